use chrono::{Datelike, Local};

use super::html::escape;

pub const DEFAULT_BRAND: &str = "Perfil Profesional";
pub const DEFAULT_TAGLINE: &str = "Validación de recibos y detección de fraude";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

/// Branding block shown at the bottom of every profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFooter {
    pub brand: String,
    pub tagline: Option<String>,
    pub year: i32,
    pub links: Vec<FooterLink>,
}

impl Default for ProfileFooter {
    fn default() -> Self {
        Self::new(DEFAULT_BRAND, Local::now().year()).with_tagline(DEFAULT_TAGLINE)
    }
}

impl ProfileFooter {
    pub fn new(brand: &str, year: i32) -> Self {
        Self {
            brand: brand.to_string(),
            tagline: None,
            year,
            links: Vec::new(),
        }
    }

    pub fn with_tagline(mut self, tagline: &str) -> Self {
        self.tagline = Some(tagline.to_string());
        self
    }

    pub fn with_link(mut self, label: &str, href: &str) -> Self {
        self.links.push(FooterLink {
            label: label.to_string(),
            href: href.to_string(),
        });
        self
    }

    pub fn render(&self) -> String {
        let brand = escape(&self.brand);
        let mut lines = vec![
            "<footer class=\"profile-footer\">".to_string(),
            "  <div class=\"profile-footer__brand\">".to_string(),
            format!("    <span class=\"profile-footer__name\">{brand}</span>"),
        ];
        if let Some(tagline) = &self.tagline {
            lines.push(format!(
                "    <p class=\"profile-footer__tagline\">{}</p>",
                escape(tagline)
            ));
        }
        lines.push("  </div>".to_string());

        if !self.links.is_empty() {
            lines.push("  <nav class=\"profile-footer__links\">".to_string());
            for link in &self.links {
                lines.push(format!(
                    "    <a href=\"{}\">{}</a>",
                    escape(&link.href),
                    escape(&link.label)
                ));
            }
            lines.push("  </nav>".to_string());
        }

        lines.push(format!(
            "  <p class=\"profile-footer__copyright\">&copy; {} {brand}. Todos los derechos reservados.</p>",
            self.year
        ));
        lines.push("</footer>".to_string());
        lines.join("\n")
    }
}
