//! Explainability adapter.
//!
//! An [`Explainer`] attributes one prediction to the model inputs. The
//! adapter only ranks, truncates and names what the explainer returns; the
//! HTML fragment is handed to the page untouched.

use serde::Serialize;

/// Raw output of a local explanation.
#[derive(Debug, Clone, Default)]
pub struct Explanation {
    /// (feature index, weight), strongest first
    pub weights: Vec<(usize, f64)>,
    /// Ready-to-embed visualisation
    pub html: String,
}

/// A local explanation engine over rows of the transformed feature view.
pub trait Explainer: Send + Sync {
    fn explain_instance(&self, row: &[f64], num_features: usize) -> Explanation;
}

/// One named contribution to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub weight: f64,
}

/// Rank an explanation by |weight| and map indices to names.
pub fn top_contributions(
    explanation: &Explanation,
    feature_names: &[String],
    top_n: usize,
) -> Vec<FeatureContribution> {
    let mut weights = explanation.weights.clone();
    weights.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    weights
        .into_iter()
        .filter_map(|(idx, weight)| {
            feature_names.get(idx).map(|name| FeatureContribution { feature: name.clone(), weight })
        })
        .take(top_n)
        .collect()
}

// ── Linear attribution ─────────────────────────────────────────────────────

/// Exact attribution for a linear model: coef_i * (x_i - mean_i), where the
/// mean is taken over the population's transformed view.
///
/// Positive weights push toward default.
pub struct LinearExplainer {
    names: Vec<String>,
    coefs: Vec<f64>,
    baseline: Vec<f64>,
}

impl LinearExplainer {
    pub fn new(names: Vec<String>, coefs: Vec<f64>, baseline: Vec<f64>) -> Self {
        Self { names, coefs, baseline }
    }

    /// Baseline = column means of the dense view rows.
    pub fn from_view(names: Vec<String>, coefs: Vec<f64>, rows: &[Vec<f64>]) -> Self {
        let width = coefs.len();
        let mut baseline = vec![0.0; width];
        if !rows.is_empty() {
            for row in rows {
                for (acc, x) in baseline.iter_mut().zip(row) {
                    *acc += x;
                }
            }
            let n = rows.len() as f64;
            baseline.iter_mut().for_each(|b| *b /= n);
        }
        Self::new(names, coefs, baseline)
    }

    fn render_html(&self, weights: &[(usize, f64)]) -> String {
        let max = weights
            .iter()
            .map(|(_, w)| w.abs())
            .fold(0.0_f64, f64::max);

        let rows: String = weights
            .iter()
            .map(|&(idx, w)| {
                let pct = if max > 0.0 { (w.abs() / max * 100.0).round() } else { 0.0 };
                let class = if w > 0.0 { "risk-up" } else { "risk-down" };
                format!(
                    r#"<tr><td class="feature">{}</td><td><div class="bar {}" style="width:{}%"></div></td><td class="weight">{:+.4}</td></tr>"#,
                    html_escape(&self.names[idx]),
                    class,
                    pct,
                    w
                )
            })
            .collect();

        format!(r#"<table class="explanation"><tbody>{}</tbody></table>"#, rows)
    }
}

impl Explainer for LinearExplainer {
    fn explain_instance(&self, row: &[f64], num_features: usize) -> Explanation {
        let mut weights: Vec<(usize, f64)> = self
            .coefs
            .iter()
            .zip(&self.baseline)
            .zip(row)
            .enumerate()
            .map(|(i, ((coef, base), x))| (i, coef * (x - base)))
            .collect();
        weights.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        weights.truncate(num_features);

        let html = self.render_html(&weights);
        Explanation { weights, html }
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
