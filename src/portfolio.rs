//! Defines the [`PortfolioRecord`] type and the [`parse`] function which
//! builds one from the site's `info.xml`. The document has a fixed
//! vocabulary rooted at a `<personalInfo>` element:
//!
//! ```xml
//! <personalInfo>
//!   <name>Ada Lovelace</name>
//!   <birth>1815-12-10</birth>
//!   <social>
//!     <github>https://github.com/ada</github>
//!     <github>https://github.com/analytical-engine</github>
//!   </social>
//!   <skills>
//!     <programmingLanguages><skill>Rust</skill></programmingLanguages>
//!   </skills>
//!   <projects>
//!     <project><name>Notes</name><link>https://example.org</link></project>
//!   </projects>
//! </personalInfo>
//! ```
//!
//! Every section is optional. Missing values come back as empty strings,
//! empty lists, or `None` for the optional project fields. Repeated elements
//! are collected in document order without deduplication.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use xmltree::Element;

use crate::xml;

/// The element that holds the whole record.
pub const ROOT_ELEMENT: &str = "personalInfo";

/// The personal and professional data that drives the site's content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub name: String,
    pub birth_date: String,
    pub email: String,
    pub title: String,
    pub cv_link: String,
    pub certifications_link: String,
    pub location: Location,
    pub social: Social,

    /// Skills grouped by category. Empty when the document has no `<skills>`
    /// section; otherwise every [`SkillCategory`] is present.
    pub skills: BTreeMap<SkillCategory, Vec<String>>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub languages: Vec<Language>,
    pub interests: Vec<String>,
    pub availability: Availability,
}

impl PortfolioRecord {
    /// Returns the age in whole years on `today`, or `None` when the birth
    /// date is blank, isn't an ISO `YYYY-MM-DD` date, or lies after `today`.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let birth = NaiveDate::parse_from_str(self.birth_date.trim(), "%Y-%m-%d").ok()?;
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }

    /// Returns the skills listed under `category`, or an empty slice.
    pub fn skills_in(&self, category: SkillCategory) -> &[String] {
        self.skills.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// Social links. A person may list several GitHub or Twitter accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    pub linkedin: String,
    pub github: Vec<String>,
    pub twitter: Vec<String>,
    pub portfolio: String,
}

/// The fixed set of skill categories, each stored under an element of the
/// same name inside `<skills>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SkillCategory {
    ProgrammingLanguages,
    WebTechnologies,
    Databases,
    ToolsPlatforms,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 5] = [
        SkillCategory::ProgrammingLanguages,
        SkillCategory::WebTechnologies,
        SkillCategory::Databases,
        SkillCategory::ToolsPlatforms,
        SkillCategory::Other,
    ];

    /// The element name (and JSON key) for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguages => "programmingLanguages",
            SkillCategory::WebTechnologies => "webTechnologies",
            SkillCategory::Databases => "databases",
            SkillCategory::ToolsPlatforms => "toolsPlatforms",
            SkillCategory::Other => "other",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub tools: Vec<String>,
    pub image: Option<String>,
    pub preview: Option<String>,
    pub link: String,
    pub demo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub grade_range: String,
    pub degree: String,
    pub stream: String,
    pub graduation: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub status: String,
    pub preferred_roles: Vec<String>,
    pub work_type: Vec<String>,
}

/// Parses a [`PortfolioRecord`] from XML text. Fails when the text isn't
/// well-formed XML or has no `<personalInfo>` element.
pub fn parse(input: &str) -> Result<PortfolioRecord> {
    let document = Element::parse(input.as_bytes())?;
    let root = xml::find(&document, ROOT_ELEMENT).ok_or(Error::MissingRoot)?;
    Ok(from_element(root))
}

fn from_element(root: &Element) -> PortfolioRecord {
    PortfolioRecord {
        name: xml::text(root, "name"),
        birth_date: xml::text(root, "birth"),
        email: xml::text(root, "email"),
        title: xml::text(root, "title"),
        cv_link: xml::text(root, "cv"),
        certifications_link: xml::text(root, "certifications"),
        location: xml::child(root, "location")
            .map(|location| Location {
                city: xml::text(location, "city"),
                country: xml::text(location, "country"),
            })
            .unwrap_or_default(),
        social: xml::child(root, "social")
            .map(|social| Social {
                linkedin: xml::text(social, "linkedin"),
                github: xml::items(social, "github"),
                twitter: xml::items(social, "twitter"),
                portfolio: xml::text(social, "portfolio"),
            })
            .unwrap_or_default(),
        skills: xml::child(root, "skills")
            .map(|skills| {
                SkillCategory::ALL
                    .iter()
                    .map(|category| {
                        (*category, xml::list(skills, category.as_str(), "skill"))
                    })
                    .collect()
            })
            .unwrap_or_default(),
        projects: xml::child(root, "projects")
            .map(|projects| xml::children(projects, "project").map(project).collect())
            .unwrap_or_default(),
        education: xml::child(root, "education")
            .map(|education| {
                xml::children(education, "education")
                    .map(|entry| Education {
                        institution: xml::text(entry, "institution"),
                        grade_range: xml::text(entry, "gradeRange"),
                        degree: xml::text(entry, "degree"),
                        stream: xml::text(entry, "stream"),
                        graduation: xml::text(entry, "graduation"),
                        gpa: xml::text(entry, "gpa"),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        languages: xml::child(root, "languages")
            .map(|languages| {
                xml::children(languages, "language")
                    .map(|entry| Language {
                        language: xml::text(entry, "language"),
                        proficiency: xml::text(entry, "proficiency"),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        interests: xml::list(root, "interests", "interest"),
        availability: xml::child(root, "availability")
            .map(|availability| Availability {
                status: xml::text(availability, "status"),
                preferred_roles: xml::list(availability, "preferredRoles", "role"),
                work_type: xml::list(availability, "workType", "type"),
            })
            .unwrap_or_default(),
    }
}

fn project(element: &Element) -> Project {
    Project {
        name: xml::text(element, "name"),
        description: xml::text(element, "description"),
        technologies: xml::list(element, "technologies", "technology"),
        tools: xml::list(element, "tools", "tool"),
        image: xml::optional_text(element, "image"),
        preview: xml::optional_text(element, "preview"),
        link: xml::text(element, "link"),
        demo: xml::optional_text(element, "demo"),
    }
}

/// Represents the result of a [`PortfolioRecord`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`PortfolioRecord`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the input isn't well-formed XML.
    #[error("XML parsing failed: {0}")]
    Xml(#[from] xmltree::ParseError),

    /// Returned when the document has no `<personalInfo>` element.
    #[error("No {} element found in XML", ROOT_ELEMENT)]
    MissingRoot,
}

#[cfg(test)]
mod test {
    use super::*;

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<personalInfo>
  <name>Ada Lovelace</name>
  <birth>1815-12-10</birth>
  <email>ada@example.org</email>
  <title>Analyst</title>
  <cv>/cv.pdf</cv>
  <certifications>/certs</certifications>
  <location><city>London</city><country>UK</country></location>
  <social>
    <linkedin>https://linkedin.com/in/ada</linkedin>
    <github>https://github.com/ada</github>
    <github>https://github.com/analytical-engine</github>
    <twitter>@ada</twitter>
    <portfolio>https://ada.example.org</portfolio>
  </social>
  <skills>
    <programmingLanguages><skill>Rust</skill><skill>Rust</skill></programmingLanguages>
    <databases><skill>Postgres</skill></databases>
  </skills>
  <projects>
    <project>
      <name>Engine</name>
      <description>Difference engine notes</description>
      <technologies><technology>Rust</technology><technology>WASM</technology></technologies>
      <tools><tool>cargo</tool></tools>
      <image>/engine.png</image>
      <link>https://github.com/ada/engine</link>
    </project>
    <project>
      <name>Notes</name>
      <demo>https://notes.example.org</demo>
    </project>
  </projects>
  <education>
    <education>
      <institution>University of London</institution>
      <gradeRange>A</gradeRange>
      <degree>BSc</degree>
      <stream>Mathematics</stream>
      <graduation>1835</graduation>
      <gpa>4.0</gpa>
    </education>
  </education>
  <languages>
    <language><language>English</language><proficiency>Native</proficiency></language>
    <language><language>French</language><proficiency>Fluent</proficiency></language>
  </languages>
  <interests><interest>Poetry</interest><interest></interest><interest>Looms</interest></interests>
  <availability>
    <status>Open</status>
    <preferredRoles><role>Engineer</role></preferredRoles>
    <workType><type>Remote</type><type>Hybrid</type></workType>
  </availability>
</personalInfo>"#;

    #[test]
    fn test_parse_full_record() -> Result<()> {
        let record = parse(FULL)?;
        assert_eq!("Ada Lovelace", record.name);
        assert_eq!("1815-12-10", record.birth_date);
        assert_eq!("/cv.pdf", record.cv_link);
        assert_eq!("/certs", record.certifications_link);
        assert_eq!(
            Location {
                city: String::from("London"),
                country: String::from("UK"),
            },
            record.location
        );
        assert_eq!(
            vec!["https://github.com/ada", "https://github.com/analytical-engine"],
            record.social.github
        );
        assert_eq!(vec!["@ada"], record.social.twitter);
        assert_eq!(vec!["Poetry", "Looms"], record.interests);
        assert_eq!(vec!["Remote", "Hybrid"], record.availability.work_type);
        assert_eq!(2, record.languages.len());
        assert_eq!("French", record.languages[1].language);
        assert_eq!("Mathematics", record.education[0].stream);
        Ok(())
    }

    #[test]
    fn test_parse_projects_in_order_with_optional_fields() -> Result<()> {
        let record = parse(FULL)?;
        let names: Vec<&str> = record.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(vec!["Engine", "Notes"], names);

        let engine = &record.projects[0];
        assert_eq!(vec!["Rust", "WASM"], engine.technologies);
        assert_eq!(Some(String::from("/engine.png")), engine.image);
        assert_eq!(None, engine.preview);
        assert_eq!(None, engine.demo);

        let notes = &record.projects[1];
        assert_eq!("", notes.link);
        assert!(notes.technologies.is_empty());
        assert_eq!(Some(String::from("https://notes.example.org")), notes.demo);
        Ok(())
    }

    #[test]
    fn test_parse_skills_keeps_duplicates_and_fills_categories() -> Result<()> {
        let record = parse(FULL)?;
        assert_eq!(5, record.skills.len());
        assert_eq!(
            &[String::from("Rust"), String::from("Rust")],
            record.skills_in(SkillCategory::ProgrammingLanguages)
        );
        assert_eq!(
            &[String::from("Postgres")],
            record.skills_in(SkillCategory::Databases)
        );
        assert!(record.skills_in(SkillCategory::Other).is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_empty_root_yields_defaults() -> Result<()> {
        let record = parse("<personalInfo/>")?;
        assert_eq!(PortfolioRecord::default(), record);
        assert!(record.skills.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_wrapped_root() -> Result<()> {
        let record = parse("<site><personalInfo><name>Ada</name></personalInfo></site>")?;
        assert_eq!("Ada", record.name);
        Ok(())
    }

    #[test]
    fn test_parse_missing_root() {
        match parse("<resume><name>Ada</name></resume>") {
            Err(Error::MissingRoot) => {}
            other => panic!("wanted MissingRoot; found {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse("<personalInfo><name>"), Err(Error::Xml(_))));
        assert!(matches!(parse(""), Err(Error::Xml(_))));
    }

    #[test]
    fn test_json_field_names() -> std::result::Result<(), serde_json::Error> {
        let record = PortfolioRecord {
            birth_date: String::from("2000-01-01"),
            ..PortfolioRecord::default()
        };
        let value = serde_json::to_value(&record)?;
        assert_eq!("2000-01-01", value["birthDate"]);
        assert!(value.get("cvLink").is_some());
        assert!(value["availability"].get("preferredRoles").is_some());
        Ok(())
    }

    #[test]
    fn test_age_on() {
        let record = PortfolioRecord {
            birth_date: String::from("2000-06-15"),
            ..PortfolioRecord::default()
        };
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(Some(23), record.age_on(date(2024, 6, 14)));
        assert_eq!(Some(24), record.age_on(date(2024, 6, 15)));
        assert_eq!(None, record.age_on(date(1999, 1, 1)));
        assert_eq!(None, PortfolioRecord::default().age_on(date(2024, 1, 1)));
    }
}
