//! Serializable render requests.
//!
//! The wire form is a flat JSON object tagged by `Dtyp`:
//! `{"Dtyp":"PlotMandel","xmin":-2,"xmax":0.5,"ymin":-1.25,"ymax":1.25,"nmax":100}`,
//! and for the Julia panel `"Dtyp":"PlotJulia"` plus the seed as `cx`, `cy`.

use serde_json::{json, Map, Value};
use thiserror::Error;

use mandeljulia_core::{Complex, Panel, Viewport};

const TAG: &str = "Dtyp";
const TAG_MANDELBROT: &str = "PlotMandel";
const TAG_JULIA: &str = "PlotJulia";

/// Why a command record was rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("malformed command text: {0}")]
    Malformed(String),

    #[error("command text is not a JSON object")]
    NotAnObject,

    #[error("command has no `Dtyp` field")]
    MissingTag,

    #[error("unknown command type {0:?}")]
    UnknownTag(String),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),
}

impl ParseError {
    /// Records without a recognised tag are skipped rather than reported.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::MissingTag | Self::UnknownTag(_))
    }
}

/// One render request for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    PlotMandelbrot {
        viewport: Viewport,
        nmax: u32,
    },
    PlotJulia {
        viewport: Viewport,
        nmax: u32,
        seed: Complex,
    },
}

impl Command {
    pub fn panel(&self) -> Panel {
        match self {
            Self::PlotMandelbrot { .. } => Panel::Mandelbrot,
            Self::PlotJulia { .. } => Panel::Julia,
        }
    }

    pub fn viewport(&self) -> Viewport {
        match self {
            Self::PlotMandelbrot { viewport, .. } | Self::PlotJulia { viewport, .. } => *viewport,
        }
    }

    pub fn nmax(&self) -> u32 {
        match self {
            Self::PlotMandelbrot { nmax, .. } | Self::PlotJulia { nmax, .. } => *nmax,
        }
    }

    /// Status line shown after this command is rendered.
    pub fn caption(&self) -> String {
        match self {
            Self::PlotMandelbrot { viewport, nmax } => {
                format!("Mandelbrot plot={viewport} nmax={nmax}")
            }
            Self::PlotJulia {
                viewport,
                nmax,
                seed,
            } => format!("Julia plot={viewport} c={seed} nmax={nmax}"),
        }
    }

    pub fn serialize(&self) -> String {
        let vp = self.viewport();
        let tag = match self {
            Self::PlotMandelbrot { .. } => TAG_MANDELBROT,
            Self::PlotJulia { .. } => TAG_JULIA,
        };
        let mut record = json!({
            TAG: tag,
            "xmin": vp.xmin,
            "xmax": vp.xmax,
            "ymin": vp.ymin,
            "ymax": vp.ymax,
            "nmax": self.nmax(),
        });
        if let (Self::PlotJulia { seed, .. }, Some(obj)) = (self, record.as_object_mut()) {
            obj.insert("cx".into(), json!(seed.re));
            obj.insert("cy".into(), json!(seed.im));
        }
        record.to_string()
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ParseError::Malformed(e.to_string()))?;
        let obj = value.as_object().ok_or(ParseError::NotAnObject)?;

        let tag = match obj.get(TAG) {
            None => return Err(ParseError::MissingTag),
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(ParseError::InvalidField {
                    field: TAG,
                    reason: format!("expected a string, got {other}"),
                })
            }
        };

        let viewport = || -> Result<Viewport, ParseError> {
            Viewport::new(
                real(obj, "xmin")?,
                real(obj, "xmax")?,
                real(obj, "ymin")?,
                real(obj, "ymax")?,
            )
            .map_err(|e| ParseError::InvalidBounds(e.to_string()))
        };

        match tag {
            TAG_MANDELBROT => Ok(Self::PlotMandelbrot {
                viewport: viewport()?,
                nmax: iterations(obj, "nmax")?,
            }),
            TAG_JULIA => Ok(Self::PlotJulia {
                viewport: viewport()?,
                nmax: iterations(obj, "nmax")?,
                seed: Complex::new(real(obj, "cx")?, real(obj, "cy")?),
            }),
            other => Err(ParseError::UnknownTag(other.to_string())),
        }
    }
}

fn real(obj: &Map<String, Value>, field: &'static str) -> Result<f64, ParseError> {
    let value = obj.get(field).ok_or(ParseError::MissingField(field))?;
    value.as_f64().ok_or_else(|| ParseError::InvalidField {
        field,
        reason: format!("expected a number, got {value}"),
    })
}

fn iterations(obj: &Map<String, Value>, field: &'static str) -> Result<u32, ParseError> {
    let value = obj.get(field).ok_or(ParseError::MissingField(field))?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n >= 1)
        .ok_or_else(|| ParseError::InvalidField {
            field,
            reason: format!("expected a positive integer, got {value}"),
        })
}
