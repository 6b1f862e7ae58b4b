use super::*;
use chrono::DateTime;

/// Hover text for a data point. Templates use `%s` for the series label and
/// `%x` / `%y` for the coordinates, optionally followed by `.N` to round to N
/// decimals. Tooltips that cannot be expressed as a template are named
/// formatters.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Tooltip {
    Template(String),
    Formatter(Formatter),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "formatter", rename_all = "lowercase")]
pub enum Formatter {
    /// Bucketed response times: the bucket spans `x` to `x + granularity`.
    Distribution { granularity: f64 },
    /// A plain count followed by the label.
    Count,
}

impl Tooltip {
    /// Renders the hover text. `time_format` is set when the x axis holds
    /// millisecond timestamps.
    pub fn format(&self, label: &str, x: f64, y: f64, time_format: Option<&str>) -> String {
        match self {
            Self::Template(template) => render_template(template, label, x, y, time_format),
            Self::Formatter(Formatter::Distribution { granularity }) => {
                format!(
                    "{y} responses for {label} were between {x} and {} ms",
                    x + granularity
                )
            }
            Self::Formatter(Formatter::Count) => format!("{y} {label}"),
        }
    }
}

fn render_template(
    template: &str,
    label: &str,
    x: f64,
    y: f64,
    time_format: Option<&str>,
) -> String {
    let mut out = String::with_capacity(template.len() + label.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('s') => {
                chars.next();
                out.push_str(label);
            }
            Some(axis @ ('x' | 'y')) => {
                chars.next();

                // optional `.N` precision suffix
                let mut precision = None;
                let mut lookahead = chars.clone();
                if lookahead.next() == Some('.') {
                    if let Some(digit) = lookahead.next().and_then(|d| d.to_digit(10)) {
                        chars.next();
                        chars.next();
                        precision = Some(digit as usize);
                    }
                }

                let value = if axis == 'x' { x } else { y };

                match (axis, time_format, precision) {
                    ('x', Some(format), None) => out.push_str(&format_time(value, format)),
                    (_, _, Some(precision)) => out.push_str(&format!("{value:.precision$}")),
                    _ => out.push_str(&value.to_string()),
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn format_time(millis: f64, format: &str) -> String {
    match DateTime::from_timestamp_millis(millis as i64) {
        Some(time) => time.format(&time::chrono_format(format)).to_string(),
        None => millis.to_string(),
    }
}
