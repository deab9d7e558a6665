//! HTML renderings of a résumé: a styled standalone document and a plain
//! print sheet. All user text is escaped.

use chrono::NaiveDate;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord,
};

const DOCUMENT_STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Georgia', serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 40px 20px; background: #fff; }
        .header { text-align: center; margin-bottom: 40px; border-bottom: 2px solid #333; padding-bottom: 20px; }
        .header h1 { font-size: 2.5em; margin-bottom: 10px; color: #2c3e50; }
        .contact-info, .contact-links { display: flex; justify-content: center; flex-wrap: wrap; gap: 20px; }
        .contact-links { color: #3498db; }
        .section { margin-bottom: 30px; }
        .section h2 { font-size: 1.5em; color: #2c3e50; border-bottom: 1px solid #bdc3c7; padding-bottom: 5px; margin-bottom: 15px; text-transform: uppercase; letter-spacing: 1px; }
        .summary { font-size: 1.1em; line-height: 1.8; text-align: justify; }
        .experience-item, .education-item, .project-item, .certification-item { margin-bottom: 20px; border-left: 3px solid #3498db; padding-left: 15px; }
        .item-header { display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 8px; flex-wrap: wrap; }
        .title { font-size: 1.2em; font-weight: bold; color: #2c3e50; }
        .subtitle { color: #3498db; font-weight: 600; font-size: 1.1em; }
        .date { color: #7f8c8d; font-style: italic; white-space: nowrap; }
        .description { margin-top: 8px; line-height: 1.7; text-align: justify; }
        .skills, .technologies { display: flex; flex-wrap: wrap; gap: 8px; }
        .skill { background: #ecf0f1; padding: 6px 12px; border-radius: 15px; font-size: 0.9em; border: 1px solid #bdc3c7; }
        .tech { background: #e8f4f8; color: #2980b9; padding: 4px 8px; border-radius: 10px; font-size: 0.8em; border: 1px solid #3498db; }
        .project-link { color: #3498db; text-decoration: none; font-weight: 600; }
        @media print { body { padding: 20px; font-size: 12px; } .header h1 { font-size: 2em; } .section h2 { font-size: 1.2em; } .title { font-size: 1em; } }
"#;

const PRINT_STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #333; text-align: center; }
        h2 { color: #555; border-bottom: 1px solid #ddd; }
        .contact { text-align: center; margin-bottom: 20px; }
        .section { margin-bottom: 20px; }
        .skill { display: inline-block; background: #f0f0f0; padding: 4px 8px; margin: 2px; border-radius: 4px; }
"#;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `2021-03-15` and `2021-03` render as `Mar 2021`; anything else as given.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// The styled standalone document.
pub fn render_document(record: &ResumeRecord) -> String {
    let info = &record.personal_info;
    let mut body = render_header(info);

    if !record.summary.is_empty() {
        body.push_str(&section(
            "Professional Summary",
            &format!(
                "<div class=\"summary\">{}</div>",
                escape_html(&record.summary)
            ),
        ));
    }
    if !record.experience.is_empty() {
        let items: String = record.experience.iter().map(render_experience).collect();
        body.push_str(&section("Professional Experience", &items));
    }
    if !record.education.is_empty() {
        let items: String = record.education.iter().map(render_education).collect();
        body.push_str(&section("Education", &items));
    }
    if !record.skills.is_empty() {
        body.push_str(&section(
            "Skills",
            &format!("<div class=\"skills\">{}</div>", chips(&record.skills, "skill")),
        ));
    }
    if !record.projects.is_empty() {
        let items: String = record.projects.iter().map(render_project).collect();
        body.push_str(&section("Projects", &items));
    }
    if !record.certifications.is_empty() {
        let items: String = record
            .certifications
            .iter()
            .map(render_certification)
            .collect();
        body.push_str(&section("Certifications", &items));
    }

    page(&info.name, DOCUMENT_STYLE, &body)
}

/// Name, contact line, summary and skills only.
pub fn render_print(record: &ResumeRecord) -> String {
    let info = &record.personal_info;
    let contact = [&info.email, &info.phone, &info.address]
        .iter()
        .map(|s| escape_html(s))
        .collect::<Vec<_>>()
        .join(" | ");

    let body = format!(
        "<h1>{name}</h1>\n<div class=\"contact\">{contact}</div>\n{summary}{skills}",
        name = escape_html(&info.name),
        summary = section(
            "Professional Summary",
            &format!("<p>{}</p>", escape_html(&record.summary))
        ),
        skills = section("Skills", &chips(&record.skills, "skill")),
    );

    page(&info.name, PRINT_STYLE, &body)
}

fn page(name: &str, style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{} - Resume</title>\n<style>{style}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(name)
    )
}

fn section(title: &str, inner: &str) -> String {
    format!("<div class=\"section\">\n<h2>{title}</h2>\n{inner}\n</div>\n")
}

fn chips(items: &[String], class: &str) -> String {
    items
        .iter()
        .map(|item| format!("<span class=\"{class}\">{}</span>", escape_html(item)))
        .collect()
}

fn render_header(info: &PersonalInfo) -> String {
    let mut header = format!(
        "<div class=\"header\">\n<h1>{}</h1>\n<div class=\"contact-info\"><span>{}</span><span>{}</span><span>{}</span></div>\n",
        escape_html(&info.name),
        escape_html(&info.email),
        escape_html(&info.phone),
        escape_html(&info.address),
    );

    let links: String = [&info.linkedin, &info.website]
        .iter()
        .filter(|link| !link.is_empty())
        .map(|link| format!("<span>{}</span>", escape_html(link)))
        .collect();
    if !links.is_empty() {
        header.push_str(&format!("<div class=\"contact-links\">{links}</div>\n"));
    }

    header.push_str("</div>\n");
    header
}

fn render_experience(entry: &ExperienceEntry) -> String {
    let end = if entry.end_date.is_empty() {
        "Present".to_string()
    } else {
        format_date(&entry.end_date)
    };
    format!(
        "<div class=\"experience-item\">\n<div class=\"item-header\"><div><div class=\"title\">{}</div><div class=\"subtitle\">{}</div></div>\
         <div class=\"date\">{} - {}</div></div>\n<div class=\"description\">{}</div>\n</div>\n",
        escape_html(&entry.position),
        escape_html(&entry.company),
        escape_html(&format_date(&entry.start_date)),
        escape_html(&end),
        escape_html(&entry.description).replace('\n', "<br>"),
    )
}

fn render_education(entry: &EducationEntry) -> String {
    let gpa = if entry.gpa.is_empty() {
        String::new()
    } else {
        format!("<div class=\"date\">GPA: {}</div>", escape_html(&entry.gpa))
    };
    format!(
        "<div class=\"education-item\">\n<div class=\"item-header\"><div><div class=\"title\">{}</div><div class=\"subtitle\">{}</div>{gpa}</div>\
         <div class=\"date\">{} - {}</div></div>\n</div>\n",
        escape_html(&entry.degree),
        escape_html(&entry.institution),
        escape_html(&format_date(&entry.start_date)),
        escape_html(&format_date(&entry.end_date)),
    )
}

/// Only http(s) targets become links; any other scheme could run script.
fn is_web_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn render_project(entry: &ProjectEntry) -> String {
    let target = entry.link.trim();
    let link = if is_web_link(target) {
        format!(
            "<a href=\"{}\" class=\"project-link\" target=\"_blank\">View Project</a>",
            escape_html(target)
        )
    } else {
        String::new()
    };
    let technologies = if entry.technologies.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"technologies\">{}</div>\n",
            chips(&entry.technologies, "tech")
        )
    };
    format!(
        "<div class=\"project-item\">\n<div class=\"item-header\"><div class=\"title\">{}</div>{link}</div>\n\
         <div class=\"description\">{}</div>\n{technologies}</div>\n",
        escape_html(&entry.name),
        escape_html(&entry.description),
    )
}

fn render_certification(entry: &CertificationEntry) -> String {
    format!(
        "<div class=\"certification-item\">\n<div class=\"item-header\"><div><div class=\"title\">{}</div><div class=\"subtitle\">{}</div></div>\
         <div class=\"date\">{}</div></div>\n</div>\n",
        escape_html(&entry.name),
        escape_html(&entry.issuer),
        escape_html(&format_date(&entry.date)),
    )
}
