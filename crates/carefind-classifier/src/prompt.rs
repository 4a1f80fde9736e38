//! Prompts asking whether a resource is specifically cancer related.

use carefind_core::EnrichedResource;

/// Prompt language. Tags other than Spanish fall back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// Maps a BCP-47-ish tag (`"es"`, `"es-MX"`, `"EN"`) to a prompt language.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "es" => Self::Spanish,
            _ => Self::English,
        }
    }
}

/// Builds the strict yes/no prompt for `resource` in `language`.
#[must_use]
pub fn build_prompt(resource: &EnrichedResource, language: Language) -> String {
    let name = &resource.name;
    let category = resource.category.as_str();
    let address = &resource.address;
    let city = &resource.city;

    match language {
        Language::English => {
            let website = resource.website.as_deref().unwrap_or("unknown");
            format!(
                "You are a strict classifier. Reply with exactly \"Yes\" or \"No\".\n\n\
                 Is this place specifically about cancer care (oncology, radiation or \
                 chemotherapy, cancer support groups, cancer charities)? A general hospital, \
                 counseling practice or transport service with no explicit cancer focus \
                 is \"No\".\n\n\
                 Name: {name}\n\
                 Category: {category}\n\
                 Website: {website}\n\
                 Address: {address}\n\
                 City: {city}\n\n\
                 Reply with only Yes or No."
            )
        }
        Language::Spanish => {
            let website = resource.website.as_deref().unwrap_or("desconocido");
            format!(
                "Eres un clasificador estricto. Responde exactamente \"Sí\" o \"No\".\n\n\
                 ¿Este lugar se dedica específicamente a la atención del cáncer (oncología, \
                 radioterapia o quimioterapia, grupos de apoyo o fundaciones contra el cáncer)? \
                 Un hospital general, un servicio de consejería o de transporte sin un enfoque \
                 explícito en el cáncer es \"No\".\n\n\
                 Nombre: {name}\n\
                 Categoría: {category}\n\
                 Sitio web: {website}\n\
                 Dirección: {address}\n\
                 Ciudad: {city}\n\n\
                 Responde solo con Sí o No."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use carefind_core::{CategoryLabel, Coordinate};

    use super::*;

    fn resource(website: Option<&str>) -> EnrichedResource {
        EnrichedResource {
            id: "p1".to_string(),
            name: "Hope Oncology Group".to_string(),
            category: CategoryLabel::SupportGroup,
            location: Coordinate { lat: 0.0, lng: 0.0 },
            address: "12 Elm St".to_string(),
            city: "Springfield".to_string(),
            country: "United States".to_string(),
            phone: None,
            website: website.map(str::to_string),
            hours: None,
        }
    }

    #[test]
    fn language_tags() {
        assert_eq!(Language::from_tag("es"), Language::Spanish);
        assert_eq!(Language::from_tag("ES-mx"), Language::Spanish);
        assert_eq!(Language::from_tag("es_US"), Language::Spanish);
        assert_eq!(Language::from_tag("en"), Language::English);
        assert_eq!(Language::from_tag("fr"), Language::English);
        assert_eq!(Language::from_tag(""), Language::English);
    }

    #[test]
    fn english_prompt_carries_resource_fields() {
        let prompt = build_prompt(&resource(Some("https://hope.example")), Language::English);
        assert!(prompt.contains("Name: Hope Oncology Group"));
        assert!(prompt.contains("Category: Support Group"));
        assert!(prompt.contains("Website: https://hope.example"));
        assert!(prompt.contains("Address: 12 Elm St"));
        assert!(prompt.contains("City: Springfield"));
        assert!(prompt.contains("Yes or No"));
    }

    #[test]
    fn missing_website_is_unknown() {
        let en = build_prompt(&resource(None), Language::English);
        assert!(en.contains("Website: unknown"));
        let es = build_prompt(&resource(None), Language::Spanish);
        assert!(es.contains("Sitio web: desconocido"));
        assert!(es.contains("Sí o No"));
    }
}
