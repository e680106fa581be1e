//! Startup validation of portfolio content.
//!
//! Errors make the content unusable; warnings flag content that renders
//! but looks unfinished. Every message is prefixed with the path of the
//! offending field (`projects[2].images[0].alt: Alt text is required`).

use url::Url;

use super::{Portfolio, PersonalInfo, Project, SocialLink};
use crate::error::MotionError;

/// Platforms a social link may name.
pub const SOCIAL_PLATFORMS: &[&str] = &[
    "github",
    "linkedin",
    "twitter",
    "instagram",
    "facebook",
    "youtube",
    "behance",
    "dribbble",
    "medium",
    "devto",
    "codepen",
    "stackoverflow",
    "discord",
    "telegram",
    "email",
    "website",
    "other",
];

/// Project categories.
pub const PROJECT_CATEGORIES: &[&str] = &[
    "web", "mobile", "design", "desktop", "game", "api", "library", "tool", "other",
];

/// Project lifecycle states.
pub const PROJECT_STATUSES: &[&str] = &["completed", "in-progress", "archived", "planned"];

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the content unusable.
    pub errors: Vec<String>,
    /// Problems worth fixing that do not block rendering.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether no error was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` if valid, otherwise [`MotionError::InvalidContent`] with every
    /// error message.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidContent`] if any error was recorded.
    pub fn into_result(self) -> Result<(), MotionError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(MotionError::InvalidContent(self.errors))
        }
    }

    /// Write errors and warnings to the log.
    pub fn log(&self) {
        for error in &self.errors {
            log::error!("content: {error}");
        }
        for warning in &self.warnings {
            log::warn!("content: {warning}");
        }
        if self.is_valid() {
            log::info!(
                "content valid ({} warnings)",
                self.warnings.len()
            );
        }
    }

    fn error(&mut self, path: &str, message: &str) {
        self.errors.push(format!("{path}: {message}"));
    }
}

/// Check content for missing or malformed fields.
#[must_use]
pub fn validate(portfolio: &Portfolio) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_personal(&portfolio.personal, &mut report);
    for (i, link) in portfolio.social.iter().enumerate() {
        validate_social(link, &format!("social[{i}]"), &mut report);
    }
    for (i, project) in portfolio.projects.iter().enumerate() {
        validate_project(project, &format!("projects[{i}]"), &mut report);
    }

    let sections = &portfolio.about.sections;
    if sections.is_empty() {
        report.error("about.sections", "At least one about section is required");
    }
    for (i, section) in sections.iter().enumerate() {
        let path = format!("about.sections[{i}]");
        if section.title.trim().is_empty() {
            report.error(&format!("{path}.title"), "Title is required");
        }
        if section.order.is_none() {
            report.error(&format!("{path}.order"), "Order must be a number");
        }
    }

    if portfolio.projects.is_empty() {
        report.warnings.push("No projects found in portfolio".to_owned());
    }
    if portfolio.social.is_empty() {
        report.warnings.push("No social links found in portfolio".to_owned());
    }
    if sections.is_empty() {
        report.warnings.push("No about sections found in portfolio".to_owned());
    }
    report
}

fn validate_personal(personal: &PersonalInfo, report: &mut ValidationReport) {
    if personal.name.trim().is_empty() {
        report.error("personal.name", "Name is required");
    }
    if personal.title.trim().is_empty() {
        report.error("personal.title", "Title is required");
    }
    if personal.bio.short.trim().is_empty() {
        report.error("personal.bio.short", "Short bio is required");
    }

    let email = &personal.contact.email;
    if email.is_empty() {
        report.error("personal.contact.email", "Email is required");
    } else if !is_valid_email(email) {
        report.error("personal.contact.email", "Invalid email format");
    }
    if let Some(phone) = &personal.contact.phone {
        if !is_valid_phone(phone) {
            report.error("personal.contact.phone", "Invalid phone number format");
        }
    }

    let avatar = &personal.avatar.url;
    if avatar.is_empty() {
        report.error("personal.avatar.url", "Avatar URL is required");
    } else if !is_valid_link(avatar) {
        report.error("personal.avatar.url", "Invalid avatar URL");
    }
    if let Some(resume) = &personal.resume {
        if !resume.url.is_empty() && !is_valid_link(&resume.url) {
            report.error("personal.resume.url", "Invalid resume URL");
        }
    }
}

fn validate_social(link: &SocialLink, path: &str, report: &mut ValidationReport) {
    if !SOCIAL_PLATFORMS.contains(&link.platform.as_str()) {
        report.error(
            &format!("{path}.platform"),
            &format!("Invalid social platform: {}", link.platform),
        );
    }
    if !is_valid_url(&link.url) {
        report.error(&format!("{path}.url"), "Invalid or missing URL");
    }
    if !link.display_order.is_some_and(|order| order >= 0) {
        report.error(
            &format!("{path}.display_order"),
            "Display order must be a non-negative number",
        );
    }
}

fn validate_project(project: &Project, path: &str, report: &mut ValidationReport) {
    let required = [
        ("id", &project.id, "Project ID is required"),
        ("title", &project.title, "Project title is required"),
        ("description", &project.description, "Project description is required"),
        (
            "short_description",
            &project.short_description,
            "Project short description is required",
        ),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            report.error(&format!("{path}.{field}"), message);
        }
    }

    if !PROJECT_CATEGORIES.contains(&project.category.as_str()) {
        report.error(
            &format!("{path}.category"),
            &format!("Invalid project category: {}", project.category),
        );
    }
    if !PROJECT_STATUSES.contains(&project.status.as_str()) {
        report.error(
            &format!("{path}.status"),
            &format!("Invalid project status: {}", project.status),
        );
    }

    if project.date.is_empty() {
        report.error(&format!("{path}.date"), "Project date is required");
    } else if !is_valid_date(&project.date) {
        report.error(&format!("{path}.date"), "Invalid project date format");
    }

    if project.images.is_empty() {
        report.error(
            &format!("{path}.images"),
            "At least one project image is required",
        );
    }
    for (i, image) in project.images.iter().enumerate() {
        let at = format!("{path}.images[{i}]");
        check_link(&image.url, &format!("{at}.url"), report);
        if image.alt.is_empty() {
            report.error(&format!("{at}.alt"), "Alt text is required");
        }
    }
    for (i, link) in project.links.iter().enumerate() {
        let at = format!("{path}.links[{i}]");
        check_link(&link.url, &format!("{at}.url"), report);
        if link.label.is_empty() {
            report.error(&format!("{at}.label"), "Label is required");
        }
    }
}

fn check_link(url: &str, path: &str, report: &mut ValidationReport) {
    if url.is_empty() {
        report.error(path, "URL is required");
    } else if !is_valid_link(url) {
        report.error(path, "Invalid URL");
    }
}

/// Absolute URL with a scheme.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// Absolute URL, or a site-relative path starting with `/`.
#[must_use]
pub fn is_valid_link(value: &str) -> bool {
    value.starts_with('/') || is_valid_url(value)
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Loose international phone check: optional leading `+`, digits with
/// space, dash, dot or parenthesis separators, 3 to 17 digits in total.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let body = value.strip_prefix('+').unwrap_or(value);
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'));
    let digits = body.chars().filter(char::is_ascii_digit).count();
    allowed && (3..=17).contains(&digits)
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD` with in-range month and day.
#[must_use]
pub fn is_valid_date(value: &str) -> bool {
    fn number(s: &str, len: usize) -> Option<u32> {
        if s.len() != len || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    }

    let parts: Vec<&str> = value.split('-').collect();
    match parts.as_slice() {
        [year] => number(year, 4).is_some(),
        [year, month] => {
            number(year, 4).is_some() && number(month, 2).is_some_and(|m| (1..=12).contains(&m))
        }
        [year, month, day] => {
            number(year, 4).is_some()
                && number(month, 2).is_some_and(|m| (1..=12).contains(&m))
                && number(day, 2).is_some_and(|d| (1..=31).contains(&d))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{AboutSection, ProjectImage, ProjectLink};

    fn valid_portfolio() -> Portfolio {
        let mut p = Portfolio::default();
        p.personal.name = "Ada".to_owned();
        p.personal.title = "Engineer".to_owned();
        p.personal.bio.short = "Builds things".to_owned();
        p.personal.contact.email = "ada@example.com".to_owned();
        p.personal.avatar.url = "https://example.com/ada.png".to_owned();
        p.social.push(SocialLink {
            platform: "github".to_owned(),
            url: "https://github.com/ada".to_owned(),
            label: None,
            display_order: Some(0),
        });
        p.projects.push(Project {
            id: "p1".to_owned(),
            title: "Project".to_owned(),
            description: "Long".to_owned(),
            short_description: "Short".to_owned(),
            images: vec![ProjectImage {
                url: "/img/p1.png".to_owned(),
                alt: "Screenshot".to_owned(),
            }],
            category: "web".to_owned(),
            status: "in-progress".to_owned(),
            date: "2023-11-02".to_owned(),
            ..Project::default()
        });
        p.about.sections.push(AboutSection {
            kind: "text".to_owned(),
            title: "Story".to_owned(),
            content: None,
            order: Some(1),
        });
        p
    }

    #[test]
    fn valid_content_has_no_findings() {
        let report = validate(&valid_portfolio());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn empty_content_reports_paths() {
        let report = validate(&Portfolio::default());
        assert!(report.errors.contains(&"personal.name: Name is required".to_owned()));
        assert!(report
            .errors
            .contains(&"personal.contact.email: Email is required".to_owned()));
        assert!(report.errors.contains(
            &"about.sections: At least one about section is required".to_owned()
        ));
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn project_errors_are_indexed() {
        let mut p = valid_portfolio();
        p.projects[0].status = "shipped".to_owned();
        p.projects[0].date = "March 2024".to_owned();
        p.projects[0].images[0].alt.clear();
        p.projects[0].links.push(ProjectLink {
            kind: "demo".to_owned(),
            url: "not a url".to_owned(),
            label: "Demo".to_owned(),
        });

        let errors = validate(&p).errors;
        assert_eq!(
            errors,
            vec![
                "projects[0].status: Invalid project status: shipped".to_owned(),
                "projects[0].date: Invalid project date format".to_owned(),
                "projects[0].images[0].alt: Alt text is required".to_owned(),
                "projects[0].links[0].url: Invalid URL".to_owned(),
            ]
        );
    }

    #[test]
    fn social_link_rules() {
        let mut p = valid_portfolio();
        p.social[0].platform = "myspace".to_owned();
        p.social[0].url = "/relative".to_owned();
        p.social[0].display_order = Some(-1);
        let errors = validate(&p).errors;
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("social[0].platform"));
    }

    #[test]
    fn field_formats() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b@c.d"));

        assert!(is_valid_phone("+1 (555) 010-0199"));
        assert!(!is_valid_phone("call me"));
        assert!(!is_valid_phone("12"));

        assert!(is_valid_date("2024"));
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2024-13"));
        assert!(!is_valid_date("24-01-01"));

        assert!(is_valid_link("/cv.pdf"));
        assert!(!is_valid_url("/cv.pdf"));
    }
}
