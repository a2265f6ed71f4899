use serde::{Deserialize, Serialize};

/// An advertised role on the careers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerPosition {
    pub id: String,
    pub title: String,
    pub location: String,
    pub employment_type: String,
    pub experience: String,
    pub description: String,
    pub responsibilities: Vec<String>,
    pub skills: Vec<String>,
}

impl CareerPosition {
    pub fn summary(&self) -> PositionSummary {
        PositionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            location: self.location.clone(),
            employment_type: self.employment_type.clone(),
            experience: self.experience.clone(),
        }
    }
}

/// Listing-page view of a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub id: String,
    pub title: String,
    pub location: String,
    pub employment_type: String,
    pub experience: String,
}

/// Built-in catalog of open roles. Editorial content lives here until the
/// listing moves into the content store.
#[derive(Debug, Clone)]
pub struct PositionCatalog {
    positions: Vec<CareerPosition>,
}

impl PositionCatalog {
    pub fn new(positions: Vec<CareerPosition>) -> Self {
        Self { positions }
    }

    pub fn standard() -> Self {
        Self::new(vec![CareerPosition {
            id: "creative-ui-ux-designer".to_string(),
            title: "Creative UI/UX Designer".to_string(),
            location: "Cyberjaya".to_string(),
            employment_type: "Full-time".to_string(),
            experience: "Minimum 2 years".to_string(),
            description: "We are looking for a well rounded and experienced creative UX/UI \
                          designer to join the team, with experience designing powerful and \
                          intuitive experiences across mobile, web and print collaterals. You \
                          will work with a diverse set of clients on a wide range of design \
                          deliverables, and can be relied upon to deliver while straddling \
                          more than one project at a time."
                .to_string(),
            responsibilities: vec![
                "Work in a collaborative fashion with the analytics and tech teams".to_string(),
                "Create UI/UX design deliverables such as user journeys, wireframes, and \
                 high-fidelity prototypes"
                    .to_string(),
                "Produce creative, intuitive, and engaging user experiences that address \
                 client requirements"
                    .to_string(),
                "Iterate design visuals for digital campaigns and branding".to_string(),
                "Support and continuously evolve visual identity systems and guidelines"
                    .to_string(),
                "Conduct usability tests and analyze the results with the analytics and tech \
                 teams"
                    .to_string(),
            ],
            skills: vec![
                "2+ years of advertising/agency experience".to_string(),
                "Effective communication and collaboration with software developers, \
                 particularly in an agile environment"
                    .to_string(),
                "Strong composition, layout and typography skills".to_string(),
                "Strong eye for digital and design trends with willingness to innovate"
                    .to_string(),
                "Experience designing high quality interactive prototypes and web design"
                    .to_string(),
                "Competency in brand design and asset creation".to_string(),
                "Experience with Figma is a must".to_string(),
            ],
        }])
    }

    pub fn all(&self) -> &[CareerPosition] {
        &self.positions
    }

    pub fn summaries(&self) -> Vec<PositionSummary> {
        self.positions
            .iter()
            .map(CareerPosition::summary)
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&CareerPosition> {
        self.positions.iter().find(|position| position.id == id)
    }
}
