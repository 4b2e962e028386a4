use glam::{DVec2, DVec3};
use indexmap::IndexMap;

use crate::assemble::{build_brush, GeometryKernel};
use crate::diag::DiagnosticSink;
use crate::error::{Error, Result};
use crate::geom::{correct, Bounds3, Plane};
use crate::repr::{
    Brush, Entity, Face, Format, MapDocument, Projection, ProjectionBase,
    SurfaceAttributes, NO_TEXTURE_NAME,
};
use crate::token::{Token, TokenKind, TokenSet};
use crate::tokenizer::Tokenizer;

const NUMBER: TokenSet = TokenSet::INTEGER.union(TokenSet::DECIMAL);
const MIN_BRUSH_FACES: usize = 4;

/// Parses map source text into entities, brushes, and faces.
///
/// The dialect is detected automatically before structural parsing. A
/// parser owns its tokenizer and is reusable: every entry point rewinds
/// the input, re-runs detection, and parses from the start.
///
/// The validity volume passed to each entry point is handed through to
/// the [`GeometryKernel`] untouched; the parser itself never inspects it.
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    format: Format,
    kernel: &'a dyn GeometryKernel,
    sink: Option<&'a dyn DiagnosticSink>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, kernel: &'a dyn GeometryKernel) -> Parser<'a> {
        Parser {
            tokenizer: Tokenizer::new(source),
            format: Format::Unknown,
            kernel,
            sink: None,
        }
    }

    /// As [`new`](Parser::new), with a sink receiving the recoverable
    /// per-brush geometry diagnostics.
    pub fn with_diagnostics(
        source: &'a str,
        kernel: &'a dyn GeometryKernel,
        sink: &'a dyn DiagnosticSink,
    ) -> Parser<'a> {
        Parser {
            tokenizer: Tokenizer::new(source),
            format: Format::Unknown,
            kernel,
            sink: Some(sink),
        }
    }

    /// The dialect found by the most recent entry-point call.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Parses the whole document. Lexical and structural errors abort the
    /// call; everything built so far is dropped before the error returns.
    pub fn parse_document(&mut self, bounds: &Bounds3) -> Result<MapDocument> {
        self.detect()?;

        let mut entities = Vec::new();
        while let Some(entity) = self.parse_entity(bounds)? {
            entities.push(entity);
        }

        Ok(MapDocument {
            format: self.format,
            entities,
        })
    }

    /// Parses the top-level entities as a flat list. Any lexical or
    /// structural failure discards the whole accumulation and yields an
    /// empty list; per-brush geometry failures only skip that brush.
    pub fn parse_entities(&mut self, bounds: &Bounds3) -> Vec<Entity> {
        self.collect_entities(bounds).unwrap_or_default()
    }

    /// Parses bare brushes with no entity wrapping, with the same failure
    /// policy as [`parse_entities`](Parser::parse_entities).
    pub fn parse_brushes(&mut self, bounds: &Bounds3) -> Vec<Brush> {
        self.collect_brushes(bounds).unwrap_or_default()
    }

    /// Parses bare faces with no brush wrapping, with the same failure
    /// policy as [`parse_entities`](Parser::parse_entities). Degenerate
    /// faces are dropped silently. Faces never reach the geometry kernel,
    /// so the validity volume is unused here.
    pub fn parse_faces(&mut self, _bounds: &Bounds3) -> Vec<Face> {
        self.collect_faces().unwrap_or_default()
    }

    /// Rewinds, classifies the dialect, and rewinds again so structural
    /// parsing starts from byte zero.
    fn detect(&mut self) -> Result<()> {
        self.tokenizer.reset();
        self.format = self.detect_format()?;
        self.tokenizer.reset();
        Ok(())
    }

    /// Classifies the dialect from the first face's fields alone.
    ///
    /// The probe skips ahead to the first `(`, reads one face's three
    /// points and texture name, and decides from what follows: bracketed
    /// axis groups mean Valve 220; five bare fields and then another face
    /// or a closing brace mean classic Quake; one extra trailing field
    /// means Hexen 2; more than one means Quake 2 surface attributes.
    fn detect_format(&mut self) -> Result<Format> {
        let mut token = self.tokenizer.next_token()?;
        while token.kind != TokenKind::OParen && token.kind != TokenKind::Eof {
            token = self.tokenizer.next_token()?;
        }
        if token.kind == TokenKind::Eof {
            return Ok(Format::Standard);
        }
        self.tokenizer.push_token(token);

        for _ in 0..3 {
            let token = self.tokenizer.next_token()?;
            expect(TokenSet::O_PAREN, &token)?;
            for _ in 0..3 {
                self.next_number()?;
            }
            let token = self.tokenizer.next_token()?;
            expect(TokenSet::C_PAREN, &token)?;
        }

        let token = self.tokenizer.next_token()?;
        expect(TokenSet::STRING, &token)?; // texture name

        let token = self.tokenizer.next_token()?;
        expect(NUMBER | TokenSet::O_BRACKET, &token)?;
        if token.kind == TokenKind::OBracket {
            return Ok(Format::Valve);
        }

        // that token was the x offset; y offset, rotation, and scales follow
        for _ in 0..4 {
            self.next_number()?;
        }

        let token = self.tokenizer.next_token()?;
        expect(NUMBER | TokenSet::O_PAREN | TokenSet::C_BRACE, &token)?;
        if !is_number(&token) {
            return Ok(Format::Standard);
        }

        // one extra field: a lone flag, or the start of surface attributes
        let token = self.tokenizer.next_token()?;
        expect(NUMBER | TokenSet::O_PAREN | TokenSet::C_BRACE, &token)?;
        if !is_number(&token) {
            return Ok(Format::Hexen2);
        }
        Ok(Format::Quake2)
    }

    fn collect_entities(&mut self, bounds: &Bounds3) -> Result<Vec<Entity>> {
        self.detect()?;

        let mut entities = Vec::new();
        while let Some(entity) = self.parse_entity(bounds)? {
            entities.push(entity);
        }
        Ok(entities)
    }

    fn collect_brushes(&mut self, bounds: &Bounds3) -> Result<Vec<Brush>> {
        self.detect()?;

        let mut brushes = Vec::new();
        loop {
            let token = self.tokenizer.next_token()?;
            match token.kind {
                TokenKind::Eof | TokenKind::CBrace => return Ok(brushes),
                TokenKind::OBrace => {
                    self.tokenizer.push_token(token);
                    if let Some(brush) = self.parse_brush(bounds)? {
                        brushes.push(brush);
                    }
                }
                _ => {
                    return Err(Error::unexpected(
                        &token,
                        TokenSet::O_BRACE | TokenSet::C_BRACE,
                    ))
                }
            }
        }
    }

    fn collect_faces(&mut self) -> Result<Vec<Face>> {
        self.detect()?;

        let mut faces = Vec::new();
        loop {
            let token = self.tokenizer.next_token()?;
            match token.kind {
                TokenKind::Eof => return Ok(faces),
                TokenKind::OParen => {
                    self.tokenizer.push_token(token);
                    if let Some(face) = self.parse_face()? {
                        faces.push(face);
                    }
                }
                _ => return Err(Error::unexpected(&token, TokenSet::O_PAREN)),
            }
        }
    }

    /// Parses one entity. `None` means the entity stream is over: end of
    /// input, or a stray top-level `}`.
    ///
    /// The entity is built into locals and only returned whole; when a
    /// sub-parse fails, everything accumulated here drops before the
    /// error propagates.
    fn parse_entity(&mut self, bounds: &Bounds3) -> Result<Option<Entity>> {
        let token = self.tokenizer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Ok(None);
        }
        expect(TokenSet::O_BRACE | TokenSet::C_BRACE, &token)?;
        if token.kind == TokenKind::CBrace {
            return Ok(None);
        }

        let first_line = token.line;
        let mut properties: IndexMap<String, String> = IndexMap::new();
        let mut brushes = Vec::new();

        loop {
            let token = self.tokenizer.next_token()?;
            match token.kind {
                TokenKind::String => {
                    let key = token.text.to_string();
                    let value = self.tokenizer.next_token()?;
                    expect(TokenSet::STRING, &value)?;
                    properties.insert(key, value.text.to_string());
                }
                TokenKind::OBrace => {
                    self.tokenizer.push_token(token);
                    loop {
                        if let Some(brush) = self.parse_brush(bounds)? {
                            brushes.push(brush);
                        }
                        let token = self.tokenizer.next_token()?;
                        expect(TokenSet::O_BRACE | TokenSet::C_BRACE, &token)?;
                        let more = token.kind == TokenKind::OBrace;
                        self.tokenizer.push_token(token);
                        if !more {
                            break;
                        }
                    }
                }
                TokenKind::CBrace => {
                    return Ok(Some(Entity {
                        properties,
                        brushes,
                        first_line,
                        line_count: token.line - first_line,
                    }));
                }
                _ => {
                    return Err(Error::unexpected(
                        &token,
                        TokenSet::O_BRACE | TokenSet::C_BRACE,
                    ))
                }
            }
        }
    }

    /// Parses one brush, opening brace first. `None` means the geometry
    /// kernel rejected the face set; the rejection has already been
    /// reported and the caller just moves on.
    fn parse_brush(&mut self, bounds: &Bounds3) -> Result<Option<Brush>> {
        let token = self.tokenizer.next_token()?;
        expect(TokenSet::O_BRACE, &token)?;

        let first_line = token.line;
        let mut faces = Vec::with_capacity(MIN_BRUSH_FACES);

        loop {
            let token = self.tokenizer.next_token()?;
            match token.kind {
                TokenKind::OParen => {
                    self.tokenizer.push_token(token);
                    if let Some(face) = self.parse_face()? {
                        faces.push(face);
                    }
                }
                TokenKind::CBrace => {
                    return Ok(build_brush(
                        self.kernel,
                        self.sink,
                        bounds,
                        faces,
                        first_line,
                        token.line - first_line,
                    ));
                }
                _ => {
                    return Err(Error::unexpected(
                        &token,
                        TokenSet::O_PAREN | TokenSet::C_BRACE,
                    ))
                }
            }
        }
    }

    /// Parses one face, opening parenthesis first. `None` means the three
    /// points are degenerate; the whole production is still consumed and
    /// the face drops out without error.
    fn parse_face(&mut self) -> Result<Option<Face>> {
        let token = self.tokenizer.next_token()?;
        expect(TokenSet::O_PAREN, &token)?;
        let line = token.line;
        self.tokenizer.push_token(token);

        let p1 = self.parse_point()?;
        let p2 = self.parse_point()?;
        let p3 = self.parse_point()?;

        let token = self.tokenizer.next_token()?;
        expect(TokenSet::STRING, &token)?;
        let texture = if token.text == NO_TEXTURE_NAME {
            String::new()
        } else {
            token.text.to_string()
        };

        let projection = match self.format {
            Format::Valve => self.parse_parallel()?,
            _ => self.parse_paraxial()?,
        };

        let surface = match self.format {
            Format::Quake2 => Some(SurfaceAttributes {
                contents: self.next_integer()?,
                flags: self.next_integer()?,
                value: self.next_number()?,
            }),
            Format::Hexen2 => {
                // no one seems to know what this extra field means
                self.next_number()?;
                None
            }
            _ => None,
        };

        Ok(Plane::from_points(p1, p2, p3).map(|plane| Face {
            points: [p1, p2, p3],
            plane,
            texture,
            projection,
            surface,
            line,
        }))
    }

    fn parse_point(&mut self) -> Result<DVec3> {
        let token = self.tokenizer.next_token()?;
        expect(TokenSet::O_PAREN, &token)?;

        let x = self.next_number()?;
        let y = self.next_number()?;
        let z = self.next_number()?;

        let token = self.tokenizer.next_token()?;
        expect(TokenSet::C_PAREN, &token)?;

        Ok(correct(DVec3::new(x, y, z)))
    }

    fn parse_paraxial(&mut self) -> Result<Projection> {
        let offset_x = self.next_number()?;
        let offset_y = self.next_number()?;
        let rotation = self.next_number()?;
        let scale_x = self.next_number()?;
        let scale_y = self.next_number()?;

        Ok(Projection::Paraxial(ProjectionBase {
            offset: DVec2::new(offset_x, offset_y),
            rotation,
            scale: DVec2::new(scale_x, scale_y),
        }))
    }

    fn parse_parallel(&mut self) -> Result<Projection> {
        let (axis_u, offset_x) = self.parse_axis()?;
        let (axis_v, offset_y) = self.parse_axis()?;
        let rotation = self.next_number()?;
        let scale_x = self.next_number()?;
        let scale_y = self.next_number()?;

        Ok(Projection::Parallel(
            ProjectionBase {
                offset: DVec2::new(offset_x, offset_y),
                rotation,
                scale: DVec2::new(scale_x, scale_y),
            },
            [axis_u, axis_v],
        ))
    }

    /// One bracketed `[ x y z offset ]` texture-axis group.
    fn parse_axis(&mut self) -> Result<(DVec3, f64)> {
        let token = self.tokenizer.next_token()?;
        expect(TokenSet::O_BRACKET, &token)?;

        let x = self.next_number()?;
        let y = self.next_number()?;
        let z = self.next_number()?;
        let offset = self.next_number()?;

        let token = self.tokenizer.next_token()?;
        expect(TokenSet::C_BRACKET, &token)?;

        Ok((DVec3::new(x, y, z), offset))
    }

    fn next_number(&mut self) -> Result<f64> {
        let token = self.tokenizer.next_token()?;
        expect(NUMBER, &token)?;
        token
            .text
            .parse()
            .map_err(|_| Error::unexpected(&token, NUMBER))
    }

    fn next_integer(&mut self) -> Result<i32> {
        let token = self.tokenizer.next_token()?;
        expect(TokenSet::INTEGER, &token)?;
        token
            .text
            .parse()
            .map_err(|_| Error::unexpected(&token, TokenSet::INTEGER))
    }
}

fn expect(expected: TokenSet, token: &Token) -> Result<()> {
    if expected.contains(token.kind.set()) {
        Ok(())
    } else {
        Err(Error::unexpected(token, expected))
    }
}

fn is_number(token: &Token) -> bool {
    NUMBER.contains(token.kind.set())
}
