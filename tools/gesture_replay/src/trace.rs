use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use sweep2sleep::{Axis, ControlAttribute};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayStep {
    Axis(Axis, i32),
    Abs { code: u16, value: i32 },
    ScreenOff,
    ScreenOn,
    Set {
        attr: ControlAttribute,
        payload: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayLine {
    pub line_no: usize,
    pub step: ReplayStep,
}

pub fn load_trace(path: &Path) -> Result<Vec<ReplayLine>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_trace(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_trace(reader: impl BufRead) -> Result<Vec<ReplayLine>> {
    let mut out = Vec::new();
    for (idx, line_result) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line_result.with_context(|| format!("failed to read line {line_no}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let step = parse_step(trimmed).with_context(|| format!("line {line_no}: {trimmed}"))?;
        out.push(ReplayLine { line_no, step });
    }
    Ok(out)
}

fn parse_step(line: &str) -> Result<ReplayStep> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["x", value] => Ok(ReplayStep::Axis(Axis::X, parse_i32(value)?)),
        ["y", value] => Ok(ReplayStep::Axis(Axis::Y, parse_i32(value)?)),
        ["abs", code, value] => Ok(ReplayStep::Abs {
            code: parse_code(code)?,
            value: parse_i32(value)?,
        }),
        ["screen", "off"] => Ok(ReplayStep::ScreenOff),
        ["screen", "on"] => Ok(ReplayStep::ScreenOn),
        ["set", name, payload @ ..] if !payload.is_empty() => {
            let attr = ControlAttribute::from_name(name)
                .ok_or_else(|| anyhow!("unknown attribute: {name}"))?;
            Ok(ReplayStep::Set {
                attr,
                payload: payload.join(" "),
            })
        }
        _ => bail!("unrecognized trace line"),
    }
}

fn parse_i32(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .with_context(|| format!("invalid coordinate '{raw}'"))
}

fn parse_code(raw: &str) -> Result<u16> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => raw.parse::<u16>(),
    };
    parsed.with_context(|| format!("invalid event code '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let text = "\
# comment
x 250
y 2000

abs 0x35 260
abs 54 2010
screen off
screen on
set sweep2sleep_debug 1
";
        let steps: Vec<ReplayStep> = parse_trace(text.as_bytes())
            .unwrap()
            .into_iter()
            .map(|line| line.step)
            .collect();

        assert_eq!(
            steps,
            vec![
                ReplayStep::Axis(Axis::X, 250),
                ReplayStep::Axis(Axis::Y, 2000),
                ReplayStep::Abs {
                    code: 0x35,
                    value: 260
                },
                ReplayStep::Abs {
                    code: 54,
                    value: 2010
                },
                ReplayStep::ScreenOff,
                ReplayStep::ScreenOn,
                ReplayStep::Set {
                    attr: ControlAttribute::Debug,
                    payload: "1".into()
                },
            ]
        );
    }

    #[test]
    fn keeps_source_line_numbers() {
        let lines = parse_trace("# header\n\nx 1\n".as_bytes()).unwrap();
        assert_eq!(lines[0].line_no, 3);
    }

    #[test]
    fn rejects_unknown_lines_and_attributes() {
        let err = parse_trace("z 10\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));

        assert!(parse_trace("set doubletap2wake 1\n".as_bytes()).is_err());
        assert!(parse_trace("set sweep2sleep\n".as_bytes()).is_err());
        assert!(parse_trace("x twelve\n".as_bytes()).is_err());
    }
}
