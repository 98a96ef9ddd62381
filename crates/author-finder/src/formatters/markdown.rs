//! Markdown output formatting.

use super::ProfileView;
use crate::pagination::PageSlot;
use crate::search::ListingPage;

/// Format a listing page as Markdown.
#[must_use]
pub fn format_listing_markdown(listing: &ListingPage) -> String {
    if listing.authors.is_empty() {
        let mut output = "No authors found.".to_string();
        if let Some(warning) = listing.warning() {
            output.push_str(&format!("\n\n> {warning}"));
        }
        return output;
    }

    let mut output = format!(
        "# Authors ({} results, page {} of {})\n\n",
        listing.window.total_count,
        listing.window.page,
        listing.window.pages()
    );

    if let Some(warning) = listing.warning() {
        output.push_str(&format!("> {warning}\n\n"));
    }

    let offset = listing.window.item_range().start;
    for (i, author) in listing.authors.iter().enumerate() {
        output.push_str(&format!("## {}. {}\n\n", offset + i + 1, author.name));
        if !author.affiliation.is_empty() {
            output.push_str(&format!("**Institution**: {}\n\n", author.affiliation.join(", ")));
        }
        output.push_str(&format!("**Profile**: /profile/{}\n\n", author.id));
    }

    output.push_str(&format!("**Pages**: {}\n", format_slots(&listing.slots, listing.window.page)));
    output
}

/// Navigation strip, current page in brackets.
#[must_use]
pub fn format_slots(slots: &[PageSlot], current: u32) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(n) if *n == current => format!("[{n}]"),
            PageSlot::Page(n) => n.to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a profile as Markdown.
#[must_use]
pub fn format_profile_markdown(profile: &ProfileView) -> String {
    let mut output = format!("# {}\n\n", profile.name);

    if let Some(image) = &profile.image {
        output.push_str(&format!("![{}]({image})\n\n", profile.name));
    }

    for section in &profile.sections {
        output.push_str(&format!("## {}\n\n", section.label));
        for entry in &section.entries {
            output.push_str(&format!("- {entry}\n"));
        }
        output.push('\n');
    }

    if !profile.homepages.is_empty() {
        output.push_str("## Homepage\n\n");
        for page in &profile.homepages {
            output.push_str(&format!("- [Homepage]({page})\n"));
        }
        output.push('\n');
    }

    if !profile.publications.is_empty() {
        output.push_str("## Publications\n\n");
        output.push_str("| Authors | Title | Year | Venue |\n|---|---|---|---|\n");
        for row in &profile.publications {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                row.authors.join("<br>"),
                row.title,
                row.year,
                row.venue
            ));
        }
    }

    output
}
