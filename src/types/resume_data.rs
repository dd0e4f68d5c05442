// src/types/resume_data.rs
//! Structured resume data exchanged with the optimization model and fed to the renderer

use serde::{Deserialize, Deserializer, Serialize};

// ===== Resume JSON Structure =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String, // free text, "Present" for the current role
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub graduation_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
}

/// Optional fields accept `null` as well as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub optimized_resume: ResumeData,
    pub ats_score: f64,
    pub suggestions: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

impl PersonalInfo {
    /// Optional links that are present and not blank, in display order
    pub fn links(&self) -> Vec<&str> {
        [self.linkedin.as_deref(), self.website.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .collect()
    }

    /// Names of required contact fields that are blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
        ];

        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}

impl Experience {
    /// Date range label as shown next to the employer, en-dash separated
    pub fn date_range(&self) -> String {
        format!("{} \u{2013} {}", self.start_date, self.end_date)
    }
}

impl ResumeData {
    /// Headline used by layouts that show a title under the name
    pub fn headline(&self) -> &str {
        self.experience
            .first()
            .map(|exp| exp.role.trim())
            .filter(|role| !role.is_empty())
            .unwrap_or("Professional")
    }
}

impl OptimizationResult {
    /// First `limit` matched keywords, for compact displays
    pub fn top_matched_keywords(&self, limit: usize) -> &[String] {
        let end = limit.min(self.matched_keywords.len());
        &self.matched_keywords[..end]
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_resume;
    use super::*;

    #[test]
    fn test_deserialize_camel_case_payload() {
        let json = r#"{
            "personalInfo": {"fullName": "Jo", "email": "jo@x.io", "phone": "1", "location": "Paris"},
            "summary": "s",
            "experience": [{"company": "C", "role": "R", "startDate": "2020", "endDate": "Present", "description": ["a"]}],
            "education": [{"school": "S", "degree": "D", "graduationDate": "2019"}],
            "skills": ["Go"]
        }"#;

        let resume: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.full_name, "Jo");
        assert_eq!(resume.personal_info.linkedin, None);
        assert_eq!(resume.experience[0].end_date, "Present");
        assert_eq!(resume.education[0].location, "");
    }

    #[test]
    fn test_null_optional_fields_decode_as_empty() {
        let json = r#"{
            "personalInfo": {"fullName": "Jo", "email": "jo@x.io", "phone": "1", "location": "Paris", "website": null},
            "summary": "s",
            "experience": [{"company": "C", "role": "R", "startDate": "2020", "endDate": "Present", "description": null}],
            "education": [{"school": "S", "degree": "D", "graduationDate": "2019", "location": null}],
            "skills": null
        }"#;

        let resume: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.website, None);
        assert!(resume.experience[0].description.is_empty());
        assert_eq!(resume.education[0].location, "");
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn test_links_skip_blank_values() {
        let mut info = sample_resume().personal_info;
        info.website = Some("   ".to_string());
        assert_eq!(info.links(), vec!["linkedin.com/in/janedoe"]);

        info.linkedin = None;
        assert!(info.links().is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut info = sample_resume().personal_info;
        assert!(info.missing_required().is_empty());

        info.email = String::new();
        info.location = " ".to_string();
        assert_eq!(info.missing_required(), vec!["email", "location"]);
    }

    #[test]
    fn test_date_range_uses_en_dash() {
        let resume = sample_resume();
        assert_eq!(resume.experience[0].date_range(), "Jan 2020 – Present");
    }

    #[test]
    fn test_headline_falls_back_without_experience() {
        let mut resume = sample_resume();
        assert_eq!(resume.headline(), "Senior Engineer");

        resume.experience.clear();
        assert_eq!(resume.headline(), "Professional");
    }

    #[test]
    fn test_top_matched_keywords() {
        let result = OptimizationResult {
            optimized_resume: sample_resume(),
            ats_score: 91.0,
            suggestions: vec![],
            matched_keywords: (0..20).map(|i| format!("kw{}", i)).collect(),
            missing_keywords: vec![],
        };

        assert_eq!(result.top_matched_keywords(15).len(), 15);
        assert_eq!(result.top_matched_keywords(15)[0], "kw0");
        assert_eq!(result.top_matched_keywords(50).len(), 20);
    }
}
