//! Server-rendered HTML pages.
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Example measurements used by the "Fill sample" button.
const SAMPLE_VALUES: [(&str, f64); 30] = [
    ("mean radius", 14.6),
    ("mean texture", 22.7),
    ("mean perimeter", 96.4),
    ("mean area", 657.0),
    ("mean smoothness", 0.085),
    ("mean compactness", 0.133),
    ("mean concavity", 0.103),
    ("mean concave points", 0.04),
    ("mean symmetry", 0.1654),
    ("mean fractal dimension", 0.05147),
    ("radius error", 0.3354),
    ("texture error", 1.108),
    ("perimeter error", 2.244),
    ("area error", 19.74),
    ("smoothness error", 0.004342),
    ("compactness error", 0.04649),
    ("concavity error", 0.06578),
    ("concave points error", 0.01506),
    ("symmetry error", 0.01738),
    ("fractal dimension error", 0.0045406),
    ("worst radius", 13.48),
    ("worst texture", 37.27),
    ("worst perimeter", 105.9),
    ("worst area", 734.5),
    ("worst smoothness", 0.1206),
    ("worst compactness", 0.317),
    ("worst concavity", 0.3682),
    ("worst concave points", 0.1305),
    ("worst symmetry", 0.2348),
    ("worst fractal dimension", 0.08004),
];

const PAGE_STYLE: &str = "
body { font-family: Helvetica, Arial, sans-serif; margin: 0; background: #fafafa; color: #222; }
nav { background: #c2185b; padding: 0.8em 2em; }
nav a { color: #fff; margin-right: 1.5em; text-decoration: none; font-weight: bold; }
main { max-width: 1000px; margin: 2em auto; padding: 0 1em; }
fieldset { border: 1px solid #ddd; margin-bottom: 1.5em; display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 0.6em 1.2em; }
label { display: flex; justify-content: space-between; align-items: center; font-size: 0.9em; }
input { width: 110px; padding: 4px; }
button { padding: 0.6em 1.4em; margin-right: 0.6em; cursor: pointer; }
#result { margin-top: 2em; padding: 1em; border-radius: 6px; display: none; }
#result.benign { background: #e8f5e9; }
#result.malignant { background: #fff3e0; }
#result.error { background: #ffebee; }
.disclaimer { color: #777; font-size: 0.85em; }
";

const PREDICT_SCRIPT: &str = r#"
function fillSample() {
  for (const [name, value] of Object.entries(SAMPLE)) {
    const field = document.getElementById(name);
    if (field) { field.value = value; }
  }
}
document.addEventListener('DOMContentLoaded', function () {
  const form = document.getElementById('predictionForm');
  const result = document.getElementById('result');
  form.addEventListener('submit', async function (e) {
    e.preventDefault();
    const body = new URLSearchParams(new FormData(form));
    try {
      const response = await fetch('/predict', { method: 'POST', body: body });
      const data = await response.json();
      if (data.error) {
        result.className = 'error';
        result.textContent = data.error;
      } else {
        result.className = data.prediction === 'Benign' ? 'benign' : 'malignant';
        result.innerHTML = '<h2>Prediction: ' + data.prediction + '</h2>'
          + '<p>Benign: ' + data.confidence.benign + ' / Malignant: ' + data.confidence.malignant + '</p>'
          + '<p>Risk level: ' + data.risk_level + '</p>';
      }
    } catch (err) {
      result.className = 'error';
      result.textContent = 'Network error occurred. Please check your connection and try again.';
    }
    result.style.display = 'block';
  });
});
"#;

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Breast Cancer Prediction" }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                nav {
                    a href="/" { "Predict" }
                    a href="/about" { "About" }
                    a href="/api/model-info" { "Model info" }
                }
                main { (content) }
            }
        }
    }
}

/// Group feature names into the mean / error / worst blocks of the form.
fn feature_groups(feature_names: &[String]) -> Vec<(&'static str, Vec<&str>)> {
    let mut groups: Vec<(&'static str, Vec<&str>)> = vec![
        ("Mean values", Vec::new()),
        ("Standard error", Vec::new()),
        ("Worst values", Vec::new()),
    ];
    for name in feature_names {
        let idx = if name.starts_with("mean ") {
            0
        } else if name.ends_with(" error") {
            1
        } else {
            2
        };
        groups[idx].1.push(name.as_str());
    }
    groups.retain(|(_, names)| !names.is_empty());
    groups
}

fn sample_json() -> String {
    let entries: Vec<String> = SAMPLE_VALUES
        .iter()
        .map(|(name, value)| format!("{:?}: {}", name, value))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// The prediction form with one numeric input per feature.
pub fn index_page(feature_names: &[String], model_type: &str) -> Markup {
    layout(
        "Predict",
        html! {
            h1 { "Breast Cancer Prediction" }
            p {
                "Enter the cell nucleus measurements of a fine needle aspirate. "
                "The current model is " strong { (model_type) } "."
            }
            form id="predictionForm" method="post" action="/predict" {
                @for (legend, names) in feature_groups(feature_names) {
                    fieldset {
                        legend { (legend) }
                        @for name in names {
                            label for=(name) {
                                (name)
                                input type="number" step="any" min="0" id=(name) name=(name);
                            }
                        }
                    }
                }
                button type="submit" { "Predict" }
                button type="button" onclick="fillSample()" { "Fill sample" }
                button type="reset" { "Clear" }
            }
            div id="result" {}
            p class="disclaimer" {
                "This tool is for educational purposes and is not a medical diagnosis."
            }
            script { (PreEscaped(format!("const SAMPLE = {};", sample_json()))) }
            script { (PreEscaped(PREDICT_SCRIPT)) }
        },
    )
}

pub fn about_page() -> Markup {
    layout(
        "About",
        html! {
            h1 { "About" }
            p {
                "The classifier is trained on the Wisconsin Diagnostic Breast Cancer dataset: "
                "30 features computed from digitized images of fine needle aspirates of breast masses, "
                "each sample labelled benign or malignant."
            }
            h2 { "Training" }
            ul {
                li { "Rows with any feature more than three standard deviations from its mean are dropped." }
                li { "The remaining rows are shuffled with a fixed seed and split 70/15/15 into training, validation and test sets." }
                li { "Features are standardized with statistics of the training set only." }
                li {
                    "Seven models are trained: logistic regression, decision tree, k-nearest neighbors, "
                    "support vector machine, naive Bayes, random forest and extra trees."
                }
                li { "The model with the best F1 score on the validation set is kept; the test set is only reported." }
            }
            h2 { "Disclaimer" }
            p class="disclaimer" {
                "Predictions are not a substitute for professional medical advice, diagnosis or treatment."
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncopredict_classifiers::data_handling::default_feature_names;

    #[test]
    fn index_has_an_input_per_feature() {
        let html = index_page(&default_feature_names(), "Naive Bayes").into_string();
        assert_eq!(html.matches("<input type=\"number\"").count(), 30);
        assert!(html.contains("name=\"worst fractal dimension\""));
        assert!(html.contains("Naive Bayes"));
    }

    #[test]
    fn features_are_grouped_by_prefix() {
        let names = default_feature_names();
        let groups = feature_groups(&names);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|(_, names)| names.len() == 10));
    }

    #[test]
    fn sample_json_covers_every_feature() {
        let json: serde_json::Value = serde_json::from_str(&sample_json()).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 30);
    }
}
