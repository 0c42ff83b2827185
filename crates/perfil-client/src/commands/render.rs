use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RenderData;
use crate::input::resolve_source;
use crate::presentation::{PlanSummary, PlansPage, ProfileFooter};
use crate::{ClientError, ClientResult};

pub fn footer(
    brand: Option<&str>,
    tagline: Option<&str>,
    year: Option<i32>,
) -> ClientResult<SuccessEnvelope> {
    let mut footer = ProfileFooter::default();
    if let Some(value) = brand {
        footer.brand = value.to_string();
    }
    if let Some(value) = tagline {
        footer.tagline = Some(value.to_string());
    }
    if let Some(value) = year {
        footer.year = value;
    }

    let data = RenderData {
        component: "footer".to_string(),
        html: footer.render(),
    };
    success("render footer", data)
}

/// Renders the plans page; `plans_path` points at a JSON array of plan
/// summaries (`-` for stdin). Without it the page shows its empty state.
pub fn plans(plans_path: Option<String>) -> ClientResult<SuccessEnvelope> {
    let plans = match plans_path {
        Some(path) => parse_plans(&resolve_source(Some(path), None)?.content)?,
        None => Vec::new(),
    };

    let data = RenderData {
        component: "plans".to_string(),
        html: PlansPage::new(plans).render(),
    };
    success("render plans", data)
}

fn parse_plans(content: &str) -> ClientResult<Vec<PlanSummary>> {
    serde_json::from_str::<Vec<PlanSummary>>(content).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Plan summaries must be a JSON array: {error}"),
            vec![
                "Each plan needs `name` and `price_label`; `features` and `highlighted` are optional."
                    .to_string(),
            ],
        )
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{footer, plans};

    #[test]
    fn footer_uses_overrides() {
        let envelope = footer(Some("Dra. Ruiz"), Some("Odontología"), Some(2024));
        assert!(envelope.is_ok());
        if let Ok(success) = envelope {
            assert_eq!(success.command, "render footer");
            let html = success.data["html"].as_str().unwrap_or_default().to_string();
            assert!(html.contains("Dra. Ruiz"));
            assert!(html.contains("Odontología"));
            assert!(html.contains("&copy; 2024"));
        }
    }

    #[test]
    fn plans_read_from_file() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(dir) = temp {
            let path = dir.path().join("plans.json");
            let written = fs::write(
                &path,
                r#"[{"name": "Básico", "price_label": "Gratis"}, {"name": "Pro", "price_label": "19 €", "highlighted": true}]"#,
            );
            assert!(written.is_ok());

            let envelope = plans(Some(path.display().to_string()));
            assert!(envelope.is_ok());
            if let Ok(success) = envelope {
                let html = success.data["html"].as_str().unwrap_or_default().to_string();
                assert!(html.contains("<h2>Básico</h2>"));
                assert!(html.contains("plan-card--highlighted"));
            }
        }
    }

    #[test]
    fn plans_without_input_render_empty_state() {
        let envelope = plans(None);
        assert!(envelope.is_ok());
        if let Ok(success) = envelope {
            let html = success.data["html"].as_str().unwrap_or_default().to_string();
            assert!(html.contains("No hay planes disponibles."));
        }
    }
}
