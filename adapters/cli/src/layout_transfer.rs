#![allow(clippy::missing_errors_doc)]

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use labyrinth_core::{ConfigError, GenerationMode, MazeConfig, MazeDimensions, MazeLayout};
use labyrinth_world::{query, Maze};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SNAPSHOT_DOMAIN: &str = "maze";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "maze:v1";
/// Delimiter used to separate the prefix, maze dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Generated maze captured together with the configuration it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MazeSnapshot {
    /// Configuration, including the interior dimensions.
    pub(crate) config: MazeConfig,
    /// Cells and special positions of the maze.
    pub(crate) layout: MazeLayout,
}

impl MazeSnapshot {
    /// Captures the installed layout of a maze, if it has one.
    #[must_use]
    pub(crate) fn capture(maze: &Maze) -> Option<Self> {
        let cells = query::cells(maze)?.clone();
        let entrance = query::entrance(maze)?;
        Some(Self {
            config: *query::config(maze),
            layout: MazeLayout {
                cells,
                entrance,
                exit: query::exit(maze),
                key: query::key(maze),
            },
        })
    }

    /// Encodes the snapshot into a single-line string suitable for sharing.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let payload = SerializableSnapshot {
            mode: self.config.mode,
            layout: self.layout.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(LayoutTransferError::Serialize)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        let dimensions = self.config.dimensions;
        Ok(format!(
            "{SNAPSHOT_HEADER}:{}x{}:{encoded}",
            dimensions.width(),
            dimensions.height()
        ))
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (width, height) = parse_dimensions(dimensions)?;
        let dimensions = MazeDimensions::new(width, height)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        let cells = &decoded.layout.cells;
        if cells.rows() != dimensions.rows() || cells.columns() != dimensions.columns() {
            return Err(LayoutTransferError::GridMismatch {
                width,
                height,
                rows: cells.rows(),
                columns: cells.columns(),
            });
        }
        if !cells
            .get(decoded.layout.entrance)
            .map_or(false, |cell| cell.is_entrance())
        {
            return Err(LayoutTransferError::MissingEntrance);
        }

        Ok(Self {
            config: MazeConfig {
                dimensions,
                mode: decoded.mode,
            },
            layout: decoded.layout,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    mode: GenerationMode,
    layout: MazeLayout,
}

/// Errors that can occur while encoding or decoding layout transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("layout payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    #[error("layout string is missing the prefix")]
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include maze dimensions.
    #[error("layout string is missing the maze dimensions")]
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The maze dimensions could not be parsed from the encoded snapshot.
    #[error("could not parse maze dimensions '{0}'")]
    InvalidDimensions(String),
    /// The maze dimensions parsed but describe an invalid maze.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse layout payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The snapshot could not be serialised.
    #[error("could not serialise layout payload: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The grid carried in the payload disagrees with the declared dimensions.
    #[error("a {width}x{height} maze needs a bordered grid, found {columns}x{rows}")]
    GridMismatch {
        /// Declared interior width.
        width: u32,
        /// Declared interior height.
        height: u32,
        /// Rows found in the payload grid.
        rows: u32,
        /// Columns found in the payload grid.
        columns: u32,
    },
    /// The declared entrance does not point at an entrance cell.
    #[error("layout entrance does not point at an entrance cell")]
    MissingEntrance,
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LayoutTransferError> {
    let (width, height) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    Ok((width, height))
}
