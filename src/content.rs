//! Portfolio content. The built-in page is used unless a `portfolio.toml`
//! replaces it.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub headings: Headings,
    #[serde(default)]
    pub chat: ChatCopy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub badge: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Code,
    Server,
    Layout,
    Database,
    Layers,
    Cloud,
    Cpu,
    Message,
    GitBranch,
    Shield,
    Terminal,
    Search,
}

impl Icon {
    /// Short pictogram drawn with the bitmap font.
    pub fn glyphs(self) -> &'static str {
        match self {
            Icon::Code => "</>",
            Icon::Server => "[=]",
            Icon::Layout => "[#]",
            Icon::Database => "(=)",
            Icon::Layers => "<=>",
            Icon::Cloud => "( )",
            Icon::Cpu => "[*]",
            Icon::Message => "\"\"",
            Icon::GitBranch => "-<",
            Icon::Shield => "(+)",
            Icon::Terminal => ">_",
            Icon::Search => "(o)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: Icon,
}

fn default_icon() -> Icon {
    Icon::Code
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub github_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Headings {
    pub about: Heading,
    pub skills: Heading,
    pub experience: Heading,
    pub projects: Heading,
    pub contact: Heading,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCopy {
    pub title: String,
    pub greeting: String,
    pub offline_note: String,
}

fn heading(title: &str, subtitle: &str) -> Heading {
    Heading {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
    }
}

impl Default for Headings {
    fn default() -> Self {
        Self {
            about: heading("Profile", "Who builds the things on this page."),
            skills: heading("Arsenal", "Powered by modern frameworks and distributed systems."),
            experience: heading(
                "Evolution",
                "A legacy of code and collaboration as a Full-Stack Engineer and .NET Specialist.",
            ),
            projects: heading("Manifesto", "Practical implementations of complex logic."),
            contact: heading(
                "Let's craft the Extraordinary.",
                "Passionate about scalable architectures and sleek user interfaces. If you're looking for a partner to elevate your digital product, my inbox is waiting.",
            ),
        }
    }
}

impl Default for ChatCopy {
    fn default() -> Self {
        Self {
            title: "Ask about my work".to_string(),
            greeting: "Hi! I can tell you about projects, skills and experience.".to_string(),
            offline_note: "Live chat is offline. Use the email button to get in touch.".to_string(),
        }
    }
}

impl PersonalInfo {
    /// "Pankaj Kumar" -> "PK".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// The hero shows the first name and the rest on two lines.
    pub fn name_lines(&self) -> (String, String) {
        let mut parts = self.name.split_whitespace();
        let first = parts.next().unwrap_or_default().to_uppercase();
        let rest = parts.collect::<Vec<_>>().join(" ").to_uppercase();
        (first, rest)
    }

    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

impl Portfolio {
    /// Reads `path` if it exists, otherwise returns the built-in content.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let portfolio: Portfolio = toml::from_str(contents)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn validate(&self) -> Result<()> {
        if self.personal.name.trim().is_empty() {
            bail!("personal.name must not be empty");
        }
        if let Some(exp) = self.experiences.iter().find(|e| e.role.trim().is_empty()) {
            bail!("experience at {} has an empty role", exp.company);
        }
        Ok(())
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        fn skill(name: &str, icon: Icon) -> Skill {
            Skill {
                name: name.to_string(),
                icon,
            }
        }
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            personal: PersonalInfo {
                name: "Pankaj Kumar".to_string(),
                email: "krm.pankaj.07@gmail.com".to_string(),
                phone: "+91-9006886481".to_string(),
                linkedin: "https://linkedin.com".to_string(),
                summary: "Full-Stack Developer with 3+ years of experience in developing scalable web applications and managing end-to-end project lifecycles using C#, .NET, Angular, and SQL. Expertise in designing secure, efficient systems and deploying features that improve performance and user experience.".to_string(),
                headline: "Full-Stack Engineer & .NET Developer architecting modern digital products.".to_string(),
                badge: "Engineering Scalable Solutions".to_string(),
            },
            skills: vec![
                skill("C#", Icon::Code),
                skill(".Net Core", Icon::Server),
                skill("Angular", Icon::Layout),
                skill("SQL Server", Icon::Database),
                skill("TypeScript", Icon::Layers),
                skill("Azure", Icon::Cloud),
                skill("Microservices", Icon::Cpu),
                skill("Postman", Icon::Message),
                skill("Git", Icon::GitBranch),
                skill("API Testing", Icon::Shield),
                skill("JavaScript", Icon::Terminal),
                skill("Unit Testing", Icon::Search),
            ],
            experiences: vec![
                Experience {
                    role: "Full Stack Engineer".to_string(),
                    company: "Persistent System".to_string(),
                    location: "Pune, India".to_string(),
                    duration: "04/2025 – Present".to_string(),
                    details: strings(&[
                        "Developed and maintained insurance domain applications using .NET Core, MVC, Web API, and SQL Server.",
                        "Implemented secure and scalable backend solutions with role-based authentication and error handling.",
                    ]),
                },
                Experience {
                    role: ".NET Developer".to_string(),
                    company: "Dreamline Technologies Private Ltd".to_string(),
                    location: "Bihar, India".to_string(),
                    duration: "10/2023 – 02/2025".to_string(),
                    details: strings(&[
                        "Developed a comprehensive solution for the Government of Bihar (Biada) using .NET and C#.",
                        "Integrated SQL Server for efficient database management and performed robust API testing using Postman.",
                    ]),
                },
                Experience {
                    role: "Full-Stack Developer".to_string(),
                    company: "SOTI India Private Ltd".to_string(),
                    location: "Gurgaon, India".to_string(),
                    duration: "08/2022 – 09/2023".to_string(),
                    details: strings(&[
                        "Developed SOTI SNAP: a tool using ASP.NET and Angular for secure management of configuration keys.",
                        "Integrated OneLogin for SSO and built utilities for service setup, reducing deployment time by 20%.",
                    ]),
                },
            ],
            projects: vec![Project {
                title: "Dating App".to_string(),
                tech_stack: strings(&["C#", "ASP.NET", "Angular", "SQL", "Typescript", "Bootstrap"]),
                description: "Features login, user authentication, photo upload, profile matching, real-time messaging, and online status indicators.".to_string(),
                github_link: Some("#".to_string()),
            }],
            education: vec![
                Education {
                    institution: "Vellore Institute of Technology".to_string(),
                    degree: "Master of Computer Application".to_string(),
                    location: "Vellore, Tamil Nadu".to_string(),
                    duration: "08/2020 - 07/2022".to_string(),
                    score: "CGPA: 7.99".to_string(),
                },
                Education {
                    institution: "Sai Nath University".to_string(),
                    degree: "Bachelor of Computer Application".to_string(),
                    location: "Ranchi, Jharkhand".to_string(),
                    duration: "08/2017 - 07/2020".to_string(),
                    score: "Percentage: 84.59%".to_string(),
                },
            ],
            certifications: vec![
                Certification {
                    name: "Programming in C#".to_string(),
                    issuer: "LinkedIn".to_string(),
                },
                Certification {
                    name: "ASP.NET And Angular".to_string(),
                    issuer: "Udemy".to_string(),
                },
            ],
            headings: Headings::default(),
            chat: ChatCopy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_content_is_valid() {
        let portfolio = Portfolio::default();
        portfolio.validate().unwrap();
        assert_eq!(portfolio.skills.len(), 12);
        assert_eq!(portfolio.experiences.len(), 3);
        assert_eq!(portfolio.personal.initials(), "PK");
    }

    #[test]
    fn name_lines_split_first_name() {
        let info = Portfolio::default().personal;
        assert_eq!(info.name_lines(), ("PANKAJ".to_string(), "KUMAR".to_string()));
        let single = PersonalInfo {
            name: "Cher".to_string(),
            ..info
        };
        assert_eq!(single.name_lines(), ("CHER".to_string(), String::new()));
    }

    #[test]
    fn parses_minimal_file() {
        let portfolio = Portfolio::parse(
            r#"
            [personal]
            name = "Ada Lovelace"
            email = "ada@example.com"

            [[skills]]
            name = "Analysis"
            icon = "git-branch"

            [[experiences]]
            role = "Analyst"
            company = "Engine Works"
            details = ["Wrote the first program."]

            [[projects]]
            title = "Notes"
            tech_stack = ["Ink"]
            "#,
        )
        .unwrap();
        assert_eq!(portfolio.personal.initials(), "AL");
        assert_eq!(portfolio.skills[0].icon, Icon::GitBranch);
        assert_eq!(portfolio.experiences[0].details.len(), 1);
        assert!(portfolio.projects[0].github_link.is_none());
        assert!(portfolio.education.is_empty());
        assert_eq!(portfolio.headings, Headings::default());
    }

    #[test]
    fn rejects_empty_name() {
        let err = Portfolio::parse(
            r#"
            [personal]
            name = "  "
            email = "x@example.com"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("personal.name"));
    }

    #[test]
    fn missing_file_uses_built_in_content() {
        let portfolio = Portfolio::load(Some(Path::new("/nonexistent/folio/portfolio.toml"))).unwrap();
        assert_eq!(portfolio, Portfolio::default());
        assert_eq!(Portfolio::load(None).unwrap(), Portfolio::default());
    }
}
