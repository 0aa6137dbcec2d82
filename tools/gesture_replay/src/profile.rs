use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use sweep2sleep::{AxisRange, ZoneGeometry};

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeSpec {
    lo: i32,
    hi: i32,
}

impl From<RangeSpec> for AxisRange {
    fn from(spec: RangeSpec) -> Self {
        AxisRange::new(spec.lo, spec.hi)
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileSpec {
    band: RangeSpec,
    back: RangeSpec,
    home: RangeSpec,
    menu: RangeSpec,
}

pub fn load_profile(path: &Path) -> Result<ZoneGeometry> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_profile(&text).with_context(|| format!("invalid profile {}", path.display()))
}

pub fn parse_profile(text: &str) -> Result<ZoneGeometry> {
    let spec: ProfileSpec = toml::from_str(text)?;
    let geometry = ZoneGeometry {
        band: spec.band.into(),
        back: spec.back.into(),
        home: spec.home.into(),
        menu: spec.menu.into(),
    };
    geometry.validate().map_err(|err| anyhow!("{err}"))?;
    Ok(geometry)
}
