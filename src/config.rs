use crate::error::CanvasError;
use crate::ir::{NodeKind, Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub padding: f32,
    pub origin: Point,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub arrange: ArrangeConfig,
    pub distribute: DistributeConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 300.0,
            node_height: 150.0,
            padding: 50.0,
            origin: Point::new(50.0, 50.0),
            grid_rows: 25,
            grid_cols: 25,
            arrange: ArrangeConfig::default(),
            distribute: DistributeConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn pitch_x(&self) -> f32 {
        self.node_width + self.padding
    }

    pub fn pitch_y(&self) -> f32 {
        self.node_height + self.padding
    }

    fn sanitize(&mut self) {
        self.node_width = self.node_width.max(1.0);
        self.node_height = self.node_height.max(1.0);
        self.padding = self.padding.max(0.0);
        self.grid_rows = self.grid_rows.max(1);
        self.grid_cols = self.grid_cols.max(1);
        self.arrange.spacing_x = self.arrange.spacing_x.max(1.0);
        self.arrange.spacing_y = self.arrange.spacing_y.max(1.0);
        self.distribute.step_x = self.distribute.step_x.max(1.0);
        self.distribute.step_y = self.distribute.step_y.max(1.0);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrangeConfig {
    pub origin: Point,
    pub spacing_x: f32,
    pub spacing_y: f32,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(100.0, 100.0),
            spacing_x: 350.0,
            spacing_y: 250.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributeConfig {
    pub offset: f32,
    pub step_x: f32,
    pub step_y: f32,
}

impl Default for DistributeConfig {
    fn default() -> Self {
        Self {
            offset: 100.0,
            step_x: 300.0,
            step_y: 200.0,
        }
    }
}

/// Default sizes handed to freshly instantiated nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub default_size: Size,
    pub condition_size: Option<Size>,
    pub response_size: Option<Size>,
}

impl PaletteConfig {
    pub fn size_for(&self, kind: &NodeKind) -> Size {
        match kind {
            NodeKind::Condition => self.condition_size.unwrap_or(self.default_size),
            NodeKind::Response => self.response_size.unwrap_or(self.default_size),
            NodeKind::Identity
            | NodeKind::Trigger
            | NodeKind::Knowledge
            | NodeKind::Memory
            | NodeKind::Prompt
            | NodeKind::Tool
            | NodeKind::Custom(_) => self.default_size,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub palette: PaletteConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PointFile {
    x: Option<f32>,
    y: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct SizeFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ArrangeConfigFile {
    origin: Option<PointFile>,
    spacing_x: Option<f32>,
    spacing_y: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DistributeConfigFile {
    offset: Option<f32>,
    step_x: Option<f32>,
    step_y: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PaletteConfigFile {
    default_size: Option<SizeFile>,
    condition_size: Option<SizeFile>,
    response_size: Option<SizeFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    node_width: Option<f32>,
    node_height: Option<f32>,
    padding: Option<f32>,
    origin: Option<PointFile>,
    grid_rows: Option<usize>,
    grid_cols: Option<usize>,
    arrange: Option<ArrangeConfigFile>,
    distribute: Option<DistributeConfigFile>,
    palette: Option<PaletteConfigFile>,
}

fn apply_point(target: &mut Point, file: PointFile) {
    if let Some(v) = file.x {
        target.x = v;
    }
    if let Some(v) = file.y {
        target.y = v;
    }
}

fn merge_size(base: Size, file: SizeFile) -> Size {
    Size::new(
        file.width.unwrap_or(base.width).max(1.0),
        file.height.unwrap_or(base.height).max(1.0),
    )
}

pub fn load_config(path: Option<&Path>) -> Result<Config, CanvasError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Overlays a JSON5 config document on top of the defaults.
pub fn parse_config(contents: &str) -> Result<Config, CanvasError> {
    let mut config = Config::default();
    let parsed: ConfigFile =
        json5::from_str(contents).map_err(|err| CanvasError::Config(err.to_string()))?;

    let layout = &mut config.layout;
    if let Some(v) = parsed.node_width {
        layout.node_width = v;
    }
    if let Some(v) = parsed.node_height {
        layout.node_height = v;
    }
    if let Some(v) = parsed.padding {
        layout.padding = v;
    }
    if let Some(origin) = parsed.origin {
        apply_point(&mut layout.origin, origin);
    }
    if let Some(v) = parsed.grid_rows {
        layout.grid_rows = v;
    }
    if let Some(v) = parsed.grid_cols {
        layout.grid_cols = v;
    }
    if let Some(arrange) = parsed.arrange {
        if let Some(origin) = arrange.origin {
            apply_point(&mut layout.arrange.origin, origin);
        }
        if let Some(v) = arrange.spacing_x {
            layout.arrange.spacing_x = v;
        }
        if let Some(v) = arrange.spacing_y {
            layout.arrange.spacing_y = v;
        }
    }
    if let Some(distribute) = parsed.distribute {
        if let Some(v) = distribute.offset {
            layout.distribute.offset = v;
        }
        if let Some(v) = distribute.step_x {
            layout.distribute.step_x = v;
        }
        if let Some(v) = distribute.step_y {
            layout.distribute.step_y = v;
        }
    }
    layout.sanitize();

    if let Some(palette) = parsed.palette {
        if let Some(size) = palette.default_size {
            config.palette.default_size = merge_size(config.palette.default_size, size);
        }
        let base = config.palette.default_size;
        if let Some(size) = palette.condition_size {
            config.palette.condition_size = Some(merge_size(base, size));
        }
        if let Some(size) = palette.response_size {
            config.palette.response_size = Some(merge_size(base, size));
        }
    }

    Ok(config)
}
