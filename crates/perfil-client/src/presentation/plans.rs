use serde::{Deserialize, Serialize};

use super::html::escape;

pub const DEFAULT_TITLE: &str = "Planes de suscripción";
pub const DEFAULT_BACK_LABEL: &str = "Volver";

/// Routing collaborator the page hands navigation off to.
pub trait Navigator {
    fn go_back(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlansAction {
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub name: String,
    pub price_label: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub highlighted: bool,
}

/// "Back + subscription plans" page shell. The plan catalog is supplied by
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlansPage {
    pub title: String,
    pub back_label: String,
    pub plans: Vec<PlanSummary>,
}

impl PlansPage {
    pub fn new(plans: Vec<PlanSummary>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            back_label: DEFAULT_BACK_LABEL.to_string(),
            plans,
        }
    }

    pub fn handle(&self, action: PlansAction, navigator: &mut dyn Navigator) {
        match action {
            PlansAction::Back => navigator.go_back(),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            "<main class=\"plans-page\">".to_string(),
            format!(
                "  <button type=\"button\" class=\"plans-page__back\" data-action=\"back\">{}</button>",
                escape(&self.back_label)
            ),
            format!("  <h1 class=\"plans-page__title\">{}</h1>", escape(&self.title)),
        ];

        if self.plans.is_empty() {
            lines.push("  <p class=\"plans-page__empty\">No hay planes disponibles.</p>".to_string());
        } else {
            lines.push("  <section class=\"plans-page__list\">".to_string());
            for plan in &self.plans {
                lines.extend(render_plan(plan));
            }
            lines.push("  </section>".to_string());
        }

        lines.push("</main>".to_string());
        lines.join("\n")
    }
}

fn render_plan(plan: &PlanSummary) -> Vec<String> {
    let class = if plan.highlighted {
        "plan-card plan-card--highlighted"
    } else {
        "plan-card"
    };
    let mut lines = vec![
        format!("    <article class=\"{class}\">"),
        format!("      <h2>{}</h2>", escape(&plan.name)),
        format!("      <p class=\"plan-card__price\">{}</p>", escape(&plan.price_label)),
    ];
    if !plan.features.is_empty() {
        lines.push("      <ul>".to_string());
        for feature in &plan.features {
            lines.push(format!("        <li>{}</li>", escape(feature)));
        }
        lines.push("      </ul>".to_string());
    }
    lines.push("    </article>".to_string());
    lines
}
