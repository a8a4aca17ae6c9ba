//! Site content shown around the catalog: slogan, contact details, carousel,
//! feature blurbs, FAQ and footer.

use serde::{Deserialize, Serialize};

/// One question of the FAQ section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    /// Question as shown to visitors
    pub question: String,

    /// Answer text
    pub answer: String,
}

/// An extra link in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLink {
    /// Link text
    pub label: String,

    /// Target URL
    pub url: String,
}

/// Editable storefront content.
///
/// Stored copies may predate some fields; missing fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteInfo {
    /// Tagline under the logo
    pub slogan: String,

    /// Store phone number used for WhatsApp chats, e.g. `+593990893095`
    pub whatsapp_number: String,

    /// Instagram profile URL
    pub instagram_link: String,

    /// Facebook page URL
    pub facebook_link: String,

    /// Home page carousel image URLs
    pub carousel_images: Vec<String>,

    /// Heading of the feature section
    pub unique_style_title: String,

    /// Materials feature title
    pub materials_title: String,

    /// Materials feature text
    pub materials_description: String,

    /// Design feature title
    pub design_title: String,

    /// Design feature text
    pub design_description: String,

    /// Service feature title
    pub service_title: String,

    /// Service feature text
    pub service_description: String,

    /// Heading of the FAQ section
    pub faq_title: String,

    /// FAQ entries in display order
    pub faq_items: Vec<FaqItem>,

    /// Footer logo URL; empty for the default logo
    pub footer_logo_url: String,

    /// Footer "about" paragraph
    pub footer_about_text: String,

    /// Heading of the footer link column
    pub footer_links_title: String,

    /// Heading of the footer contact column
    pub footer_contact_title: String,

    /// Extra footer links
    pub footer_custom_links: Vec<CustomLink>,

    /// Contact e-mail
    pub email_address: String,

    /// Postal address
    pub address: String,

    /// Free text under the footer columns
    pub footer_additional_info: String,

    /// Copyright line; empty for the default one
    pub footer_copyright_text: String,

    /// Heading of the products section
    pub products_title: String,

    /// Subheading of the products section
    pub products_subtitle: String,

    /// Intro text of the products section
    pub products_description: String,
}

impl SiteInfo {
    /// Link that opens a WhatsApp chat with the store, if a number is set.
    pub fn whatsapp_link(&self) -> Option<String> {
        let digits: String = self
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        (!digits.is_empty()).then(|| format!("https://wa.me/{digits}"))
    }
}
