//! Plain-text rendering of the pages.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use property::model::Property;
use property_bff::{FormState, ListState, ListView, PageLink};

/// `850000` → `850 000 €`.
pub fn format_price(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        grouped.insert(0, '-');
    }
    format!("{grouped} €")
}

fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

fn pager(current: usize, links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current => format!("[{n}]"),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn list_page(state: &ListState, view: &ListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Liste des Propriétés ({})", view.matching);
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {error}");
    }
    if view.items.is_empty() {
        let _ = writeln!(out, "Aucune propriété trouvée.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<32}  {:<30}  {:<14}  {:>12}  {:>8}",
        "ID", "TITRE", "VILLE", "PRIX", "SURFACE"
    );
    for p in &view.items {
        let _ = writeln!(
            out,
            "{:<32}  {:<30}  {:<14}  {:>12}  {:>6} m²",
            p.id,
            truncate(&p.title, 30),
            truncate(&p.city, 14),
            format_price(p.price),
            p.surface
        );
    }
    let _ = writeln!(
        out,
        "Affichage {}-{} sur {} · page {}/{}  {}",
        view.first,
        view.last,
        view.matching,
        state.page,
        view.total_pages,
        pager(state.page, &view.links)
    );
    out
}

pub fn detail_page(p: &Property) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", p.title);
    let _ = writeln!(out, "  Ville:                 {}", p.city);
    let _ = writeln!(out, "  Prix:                  {}", format_price(p.price));
    let _ = writeln!(out, "  Surface:               {} m²", p.surface);
    let _ = writeln!(out, "  Prix au m²:            {}", format_price(p.price_per_m2()));
    if let Some(description) = &p.description {
        let _ = writeln!(out, "  Description:           {description}");
    }
    let _ = writeln!(out, "  Créée le:              {}", format_date(&p.created_at));
    let _ = writeln!(out, "  Dernière modification: {}", format_date(&p.updated_at));
    let _ = writeln!(out, "  ID:                    {}", p.id);
    out
}

pub fn form_errors(form: &FormState) -> String {
    let mut out = String::new();
    for (field, message) in &form.errors {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(850000.0), "850 000 €");
        assert_eq!(format_price(6666.67), "6 667 €");
        assert_eq!(format_price(950.0), "950 €");
        assert_eq!(format_price(1234567.0), "1 234 567 €");
    }

    #[test]
    fn pager_marks_current_page() {
        let links = property_bff::page_window(5, 10);
        assert_eq!(pager(5, &links), "1 ... 4 [5] 6 ... 10");
    }

    #[test]
    fn long_titles_are_cut() {
        assert_eq!(truncate("Appartement", 5), "Appa…");
        assert_eq!(truncate("Loft", 5), "Loft");
    }
}
