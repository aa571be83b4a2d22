//! Output generation for the crosscheck CLI application

use serde::Serialize;
use tinytemplate::{format_unescaped, TinyTemplate};
use tracing::debug;

use crosscheck::checking::Recipes;
use crosscheck::problem::{Finding, Report};
use crosscheck::rendering::{Render, Syntax};

static SUMMARY: &str = "{heading}\n{{ for line in lines }}{line}\n{{ endfor }}";

static RECIPES: &str = "{{ for line in lines }}{line}\n{{ endfor }}{heading}\n";

#[derive(Serialize)]
struct Context {
    heading: String,
    lines: Vec<String>,
}

fn fill(name: &'static str, template: &'static str, context: &Context) -> Result<String, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template(name, template)?;
    tt.render(name, context)
}

fn entry(renderer: &impl Render, bullet: &str, syntax: Syntax, finding: &Finding) -> String {
    format!(
        " {} {}: {}",
        renderer.style(syntax, bullet),
        renderer.style(
            Syntax::Locator,
            &finding
                .locator
                .to_string()
        ),
        finding
            .problem
            .message()
    )
}

/// The result of a whole audit: a heading, then errors as ` - ` lines and
/// warnings as ` ~ ` lines.
pub fn summary(renderer: &impl Render, report: &Report) -> Result<String, tinytemplate::error::Error> {
    let heading = if report.is_clean() {
        renderer.style(Syntax::Passed, "Validation passed.")
    } else {
        renderer.style(Syntax::Failed, "Validation failed:")
    };

    let mut lines: Vec<String> = report
        .errors()
        .map(|finding| entry(renderer, "-", Syntax::Bullet, finding))
        .collect();
    lines.extend(
        report
            .warnings()
            .map(|finding| entry(renderer, "~", Syntax::Warning, finding)),
    );

    debug!("Rendering {} lines", lines.len());
    fill("summary", SUMMARY, &Context { heading, lines })
}

/// The result of validating recipes: one `ERROR:` or `WARN:` line per
/// finding then a tally.
pub fn recipes(renderer: &impl Render, recipes: &Recipes) -> Result<String, tinytemplate::error::Error> {
    let lines = recipes
        .findings
        .iter()
        .map(|finding| {
            if finding.is_error() {
                format!("{} {}", renderer.style(Syntax::Failed, "ERROR:"), finding)
            } else {
                format!("{} {}", renderer.style(Syntax::Warning, "WARN:"), finding)
            }
        })
        .collect();

    let errors = recipes.errors();
    let warnings = recipes.warnings();

    let heading = if errors > 0 {
        format!(
            "{} {} error(s), {} warning(s)",
            renderer.style(Syntax::Failed, "Validation failed:"),
            renderer.style(Syntax::Count, &errors.to_string()),
            renderer.style(Syntax::Count, &warnings.to_string())
        )
    } else {
        format!(
            "{} {} recipe(s), {} warning(s)",
            renderer.style(Syntax::Passed, "Validation OK:"),
            renderer.style(Syntax::Count, &recipes.count.to_string()),
            renderer.style(Syntax::Count, &warnings.to_string())
        )
    };

    fill("recipes", RECIPES, &Context { heading, lines })
}
