//! Parsing and brush reconstruction for Quake-family map sources.
//!
//! A map source describes a level as entities holding convex solids
//! ("brushes"), each bounded by planar faces given as three points plus
//! texture-projection fields. [`Parser`] turns that text into an owned
//! entity/brush/face graph, silently detecting which of the four
//! historical dialects it is reading (classic Quake, Valve 220, Hexen 2,
//! or Quake 2).
//!
//! Realizing a brush's planes as a solid is delegated to an external
//! [`GeometryKernel`]. A brush the kernel rejects is reported through an
//! optional [`DiagnosticSink`] and skipped; lexical and structural
//! defects instead abort the parse with a line/column error.
//!
//! ```
//! use brushwork::{Bounds3, GeometryKernel, Parser};
//! # use brushwork::{Face, GeometryError};
//!
//! struct AcceptAll;
//!
//! impl GeometryKernel for AcceptAll {
//!     fn assemble(&self, _: &Bounds3, _: &[Face]) -> Result<(), GeometryError> {
//!         Ok(())
//!     }
//! }
//!
//! let source = r#"
//! {
//! "classname" "worldspawn"
//! {
//! ( 0 0 0 ) ( 0 1 0 ) ( 1 0 0 ) FLOOR 0 0 0 1 1
//! }
//! }
//! "#;
//!
//! let mut parser = Parser::new(source, &AcceptAll);
//! let document = parser.parse_document(&Bounds3::cube(8192.0))?;
//!
//! assert_eq!(document.entities.len(), 1);
//! assert_eq!(document.entities[0].classname(), Some("worldspawn"));
//! # Ok::<(), brushwork::Error>(())
//! ```

pub mod assemble;
pub mod diag;
pub mod error;
pub mod geom;
pub mod parser;
pub mod repr;
pub mod token;
pub mod tokenizer;

pub use assemble::{order_faces, GeometryKernel};
pub use diag::{DiagnosticSink, LogSink};
pub use error::{Error, GeometryError, Result};
pub use geom::{Bounds3, Plane};
pub use parser::Parser;
pub use repr::{
    Brush, Entity, Face, Format, MapDocument, Projection, ProjectionBase,
    SurfaceAttributes, NO_TEXTURE_NAME,
};
pub use token::{Token, TokenKind, TokenSet};
pub use tokenizer::Tokenizer;


#[cfg(test)]
mod geom_test;


#[cfg(test)]
mod tokenizer_test;
