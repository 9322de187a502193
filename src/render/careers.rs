use super::{escape_html, layout};
use crate::careers::{Career, CareerFilters, Office};

/// List of openings; always emits the `#careers` container, even when empty.
pub(super) fn career_list(careers: &[Career]) -> String {
    if careers.is_empty() {
        return "<ul id=\"careers\" class=\"Adp-careers\"></ul>\n<p class=\"Adp-careers__empty\">There are no open positions right now. Check back soon.</p>\n".to_string();
    }

    let mut out = String::from("<ul id=\"careers\" class=\"Adp-careers\">\n");
    for career in careers {
        let departments = career
            .departments
            .iter()
            .map(|d| d.id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "<li class=\"Adp-career\" data-departments=\"{}\" data-location=\"{}\">\n<h3><a href=\"{}\">{}</a></h3>\n<p class=\"Adp-career__location\">{}</p>\n</li>\n",
            departments,
            escape_html(&career.location.name),
            escape_html(&career.absolute_url),
            escape_html(&career.title),
            escape_html(&career.location.name),
        ));
    }
    out.push_str("</ul>\n");
    out
}

fn filter_select(id: &str, label: &str, options: &[(String, String)]) -> String {
    let mut out = format!(
        "<label for=\"{id}\">{label}</label>\n<select id=\"{id}\" name=\"{id}\">\n<option value=\"\">All</option>\n",
        id = id,
        label = label
    );
    for (value, text) in options {
        out.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            escape_html(value),
            escape_html(text)
        ));
    }
    out.push_str("</select>\n");
    out
}

pub fn careers_page(careers: &[Career], offices: &[Office]) -> String {
    let filters = CareerFilters::from_listings(careers, offices);

    let departments: Vec<(String, String)> = filters
        .departments
        .iter()
        .map(|d| (d.id.to_string(), d.name.clone()))
        .collect();
    let locations: Vec<(String, String)> = filters
        .locations
        .iter()
        .map(|l| (l.clone(), l.clone()))
        .collect();

    let body = format!(
        "<h1>Careers</h1>\n<form class=\"Adp-careers__filters\">\n{}{}</form>\n{}",
        filter_select("department-filter", "Department", &departments),
        filter_select("location-filter", "Location", &locations),
        career_list(careers)
    );

    layout("Careers", &body)
}

/// The team page: fixed introduction followed by developer relations openings.
pub fn team_page(intro: &str, careers: &[Career]) -> String {
    let body = format!(
        "<h1>Team</h1>\n{}\n<h2>Open positions</h2>\n{}",
        intro,
        career_list(careers)
    );
    layout("Team", &body)
}
