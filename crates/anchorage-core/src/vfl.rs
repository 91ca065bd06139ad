//! Visual format language.
//!
//! A compact string syntax describing spacing and size constraints between
//! named views, for example `H:|-[icon(32)]-[title(>=120@750)]-|`.
//!
//! ```text
//! format      := (orientation ':')? (superview connection)? view (connection view)* (connection superview)?
//! orientation := 'H' | 'V'
//! superview   := '|'
//! view        := '[' name ('(' predicate (',' predicate)* ')')? ']'
//! connection  := '' | '-' predicates '-' | '-'
//! predicates  := simple | '(' predicate (',' predicate)* ')'
//! simple      := metricName | number
//! predicate   := relation? (number | metricName | viewName) ('@' (number | metricName))?
//! relation    := '==' | '<=' | '>='
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Anchor, AnchorRef, Axis, Constraint, Metrics, Priority, Relation, ViewDictionary, ViewId};

/// Gap inserted by a bare `-` between two sibling views
pub const STANDARD_SPACING: f32 = 8.0;

/// Gap inserted by a bare `-` between a view and its superview edge
pub const STANDARD_SUPERVIEW_SPACING: f32 = 20.0;

bitflags! {
    /// Alignment and direction options applied to every view in a format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FormatOptions: u32 {
        const ALIGN_ALL_LEFT = 1 << 1;
        const ALIGN_ALL_RIGHT = 1 << 2;
        const ALIGN_ALL_TOP = 1 << 3;
        const ALIGN_ALL_BOTTOM = 1 << 4;
        const ALIGN_ALL_LEADING = 1 << 5;
        const ALIGN_ALL_TRAILING = 1 << 6;
        const ALIGN_ALL_CENTER_X = 1 << 9;
        const ALIGN_ALL_CENTER_Y = 1 << 10;
        const ALIGN_ALL_LAST_BASELINE = 1 << 11;
        const ALIGN_ALL_FIRST_BASELINE = 1 << 12;

        const DIRECTION_LEFT_TO_RIGHT = 1 << 16;
        const DIRECTION_RIGHT_TO_LEFT = 2 << 16;
    }
}

impl FormatOptions {
    const ALIGNMENTS: [(FormatOptions, Anchor); 10] = [
        (FormatOptions::ALIGN_ALL_LEFT, Anchor::Left),
        (FormatOptions::ALIGN_ALL_RIGHT, Anchor::Right),
        (FormatOptions::ALIGN_ALL_TOP, Anchor::Top),
        (FormatOptions::ALIGN_ALL_BOTTOM, Anchor::Bottom),
        (FormatOptions::ALIGN_ALL_LEADING, Anchor::Leading),
        (FormatOptions::ALIGN_ALL_TRAILING, Anchor::Trailing),
        (FormatOptions::ALIGN_ALL_CENTER_X, Anchor::CenterX),
        (FormatOptions::ALIGN_ALL_CENTER_Y, Anchor::CenterY),
        (FormatOptions::ALIGN_ALL_LAST_BASELINE, Anchor::LastBaseline),
        (FormatOptions::ALIGN_ALL_FIRST_BASELINE, Anchor::FirstBaseline),
    ];

    /// Anchors selected by the alignment flags
    pub fn alignment_anchors(self) -> impl Iterator<Item = Anchor> {
        Self::ALIGNMENTS
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, anchor)| anchor)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VflError {
    #[error("{message} at offset {offset} in \"{format}\"")]
    Syntax {
        format: String,
        offset: usize,
        message: String,
    },

    #[error("unknown view `{name}` in \"{format}\"")]
    UnknownView { format: String, name: String },

    #[error("unknown metric `{name}` in \"{format}\"")]
    UnknownMetric { format: String, name: String },

    #[error("\"{format}\" refers to the superview but `{view}` has none")]
    MissingSuperview { format: String, view: String },

    #[error("alignment on {anchor} is not valid for a {orientation:?} format \"{format}\"")]
    InvalidAlignment {
        format: String,
        anchor: Anchor,
        orientation: Orientation,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A number or a metric name
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f32),
    Metric(String),
}

/// Right-hand side of a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Number(f32),
    /// Metric or view name, resolved during expansion
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub relation: Relation,
    pub object: Object,
    pub priority: Option<Value>,
}

/// Spacing between two neighbouring items
#[derive(Debug, Clone, PartialEq)]
pub enum Connection {
    /// No dash: the edges touch
    Flush,
    /// A single dash: standard spacing
    Standard,
    Spacing(Vec<Predicate>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewElement {
    pub name: String,
    pub predicates: Vec<Predicate>,
}

/// Parsed form of one format string
#[derive(Debug, Clone, PartialEq)]
pub struct VisualFormat {
    pub orientation: Orientation,
    /// Connection from the superview's leading edge to the first view
    pub leading: Option<Connection>,
    pub views: Vec<ViewElement>,
    /// `connections[i]` sits between `views[i]` and `views[i + 1]`
    pub connections: Vec<Connection>,
    /// Connection from the last view to the superview's trailing edge
    pub trailing: Option<Connection>,
}

impl VisualFormat {
    pub fn parse(format: &str) -> Result<Self, VflError> {
        Parser::new(format).parse()
    }
}

struct Parser<'a> {
    format: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(format: &'a str) -> Self {
        Parser { format, pos: 0 }
    }

    fn parse(mut self) -> Result<VisualFormat, VflError> {
        let orientation = self.orientation();

        let mut leading = None;
        if self.eat('|') {
            leading = Some(self.connection()?);
        }

        let mut views = vec![self.view()?];
        let mut connections = Vec::new();
        let mut trailing = None;

        loop {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }
            let connection = self.connection()?;
            match self.peek() {
                Some('[') => {
                    connections.push(connection);
                    views.push(self.view()?);
                }
                Some('|') => {
                    self.bump();
                    trailing = Some(connection);
                    self.skip_whitespace();
                    if !self.at_end() {
                        return Err(self.error("unexpected input after trailing `|`"));
                    }
                    break;
                }
                _ => return Err(self.error("expected `[` or `|`")),
            }
        }

        Ok(VisualFormat {
            orientation,
            leading,
            views,
            connections,
            trailing,
        })
    }

    fn orientation(&mut self) -> Orientation {
        self.skip_whitespace();
        let rest = &self.format[self.pos..];
        if rest.starts_with("H:") {
            self.pos += 2;
            Orientation::Horizontal
        } else if rest.starts_with("V:") {
            self.pos += 2;
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    fn connection(&mut self) -> Result<Connection, VflError> {
        if !self.eat('-') {
            return Ok(Connection::Flush);
        }
        self.skip_whitespace();
        if matches!(self.peek(), Some('[') | Some('|')) {
            return Ok(Connection::Standard);
        }
        let predicates = if self.eat('(') {
            self.predicate_list(')')?
        } else {
            vec![self.simple_predicate()?]
        };
        self.expect('-')?;
        Ok(Connection::Spacing(predicates))
    }

    fn view(&mut self) -> Result<ViewElement, VflError> {
        self.expect('[')?;
        let name = self.identifier()?;
        let predicates = if self.eat('(') {
            self.predicate_list(')')?
        } else {
            Vec::new()
        };
        self.expect(']')?;
        Ok(ViewElement { name, predicates })
    }

    fn predicate_list(&mut self, close: char) -> Result<Vec<Predicate>, VflError> {
        let mut predicates = vec![self.predicate()?];
        while self.eat(',') {
            predicates.push(self.predicate()?);
        }
        self.expect(close)?;
        Ok(predicates)
    }

    fn simple_predicate(&mut self) -> Result<Predicate, VflError> {
        // `-10-` stays unsigned; a negative gap needs `-(-10)-`
        let object = match self.value(false)? {
            Value::Number(n) => Object::Number(n),
            Value::Metric(name) => Object::Name(name),
        };
        Ok(Predicate {
            relation: Relation::Equal,
            object,
            priority: None,
        })
    }

    fn predicate(&mut self) -> Result<Predicate, VflError> {
        let relation = self.relation();
        let object = match self.value(true)? {
            Value::Number(n) => Object::Number(n),
            Value::Metric(name) => Object::Name(name),
        };
        let priority = if self.eat('@') {
            Some(self.value(true)?)
        } else {
            None
        };
        Ok(Predicate {
            relation,
            object,
            priority,
        })
    }

    fn relation(&mut self) -> Relation {
        self.skip_whitespace();
        let rest = &self.format[self.pos..];
        let relation = if rest.starts_with("==") {
            Relation::Equal
        } else if rest.starts_with("<=") {
            Relation::LessOrEqual
        } else if rest.starts_with(">=") {
            Relation::GreaterOrEqual
        } else {
            return Relation::Equal;
        };
        self.pos += 2;
        relation
    }

    fn value(&mut self, signed: bool) -> Result<Value, VflError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c.is_ascii_digit() || c == '.' => self.number().map(Value::Number),
            Some('-' | '+') if signed => self.number().map(Value::Number),
            Some(c) if is_identifier_start(c) => self.identifier().map(Value::Metric),
            _ => Err(self.error("expected a number or a name")),
        }
    }

    fn number(&mut self) -> Result<f32, VflError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.bump();
        }
        self.format[start..self.pos].parse::<f32>().map_err(|_| VflError::Syntax {
            format: self.format.to_string(),
            offset: start,
            message: format!("invalid number `{}`", &self.format[start..self.pos]),
        })
    }

    fn identifier(&mut self) -> Result<String, VflError> {
        self.skip_whitespace();
        let start = self.pos;
        match self.peek() {
            Some(c) if is_identifier_start(c) => self.bump(),
            _ => return Err(self.error("expected a name")),
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        Ok(self.format[start..self.pos].to_string())
    }

    fn expect(&mut self, c: char) -> Result<(), VflError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", c)))
        }
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.format[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.format.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, message: &str) -> VflError {
        VflError::Syntax {
            format: self.format.to_string(),
            offset: self.pos,
            message: message.to_string(),
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Everything needed to turn a parsed format into constraints.
pub struct Expansion<'a> {
    pub format: &'a str,
    pub options: FormatOptions,
    pub metrics: &'a Metrics,
    pub views: &'a ViewDictionary,
    /// Looks up the superview of the first view when `|` is used
    pub superview: &'a dyn Fn(ViewId) -> Option<ViewId>,
}

impl Expansion<'_> {
    pub fn expand(&self, parsed: &VisualFormat) -> Result<Vec<Constraint>, VflError> {
        let (lead, trail, dimension) = match parsed.orientation {
            Orientation::Horizontal if self.options.contains(FormatOptions::DIRECTION_RIGHT_TO_LEFT) => {
                (Anchor::Right, Anchor::Left, Anchor::Width)
            }
            Orientation::Horizontal if self.options.contains(FormatOptions::DIRECTION_LEFT_TO_RIGHT) => {
                (Anchor::Left, Anchor::Right, Anchor::Width)
            }
            Orientation::Horizontal => (Anchor::Leading, Anchor::Trailing, Anchor::Width),
            Orientation::Vertical => (Anchor::Top, Anchor::Bottom, Anchor::Height),
        };
        let reversed = parsed.orientation == Orientation::Horizontal
            && self.options.contains(FormatOptions::DIRECTION_RIGHT_TO_LEFT);

        let views = parsed
            .views
            .iter()
            .map(|element| self.view(&element.name))
            .collect::<Result<Vec<_>, _>>()?;

        let superview = if parsed.leading.is_some() || parsed.trailing.is_some() {
            let first = views[0];
            Some((self.superview)(first).ok_or_else(|| VflError::MissingSuperview {
                format: self.format.to_string(),
                view: parsed.views[0].name.clone(),
            })?)
        } else {
            None
        };

        let mut constraints = Vec::new();

        if let (Some(connection), Some(superview)) = (&parsed.leading, superview) {
            self.connect(
                &mut constraints,
                connection,
                AnchorRef::new(superview, lead),
                AnchorRef::new(views[0], lead),
                STANDARD_SUPERVIEW_SPACING,
                reversed,
            )?;
        }

        for (index, element) in parsed.views.iter().enumerate() {
            for predicate in &element.predicates {
                constraints.push(self.size_predicate(views[index], dimension, predicate)?);
            }
            if let Some(connection) = parsed.connections.get(index) {
                self.connect(
                    &mut constraints,
                    connection,
                    AnchorRef::new(views[index], trail),
                    AnchorRef::new(views[index + 1], lead),
                    STANDARD_SPACING,
                    reversed,
                )?;
            }
        }

        if let (Some(connection), Some(superview)) = (&parsed.trailing, superview) {
            let last = views[views.len() - 1];
            self.connect(
                &mut constraints,
                connection,
                AnchorRef::new(last, trail),
                AnchorRef::new(superview, trail),
                STANDARD_SUPERVIEW_SPACING,
                reversed,
            )?;
        }

        for anchor in self.options.alignment_anchors() {
            let valid = match parsed.orientation {
                Orientation::Horizontal => anchor.axis() == Axis::Vertical,
                Orientation::Vertical => anchor.axis() == Axis::Horizontal,
            };
            if !valid {
                return Err(VflError::InvalidAlignment {
                    format: self.format.to_string(),
                    anchor,
                    orientation: parsed.orientation,
                });
            }
            for view in views.iter().skip(1) {
                constraints.push(Constraint::equal(
                    AnchorRef::new(*view, anchor),
                    AnchorRef::new(views[0], anchor),
                ));
            }
        }

        Ok(constraints)
    }

    /// Constraints for the gap between `before` and `after`, where `before`
    /// comes first in reading order.
    fn connect(
        &self,
        constraints: &mut Vec<Constraint>,
        connection: &Connection,
        before: AnchorRef,
        after: AnchorRef,
        standard: f32,
        reversed: bool,
    ) -> Result<(), VflError> {
        let (first, second) = if reversed { (before, after) } else { (after, before) };
        match connection {
            Connection::Flush => constraints.push(Constraint::equal(first, second)),
            Connection::Standard => {
                constraints.push(Constraint::equal(first, second).with_constant(standard))
            }
            Connection::Spacing(predicates) => {
                for predicate in predicates {
                    let constant = match &predicate.object {
                        Object::Number(n) => *n,
                        Object::Name(name) => self.metric(name)?,
                    };
                    constraints.push(
                        Constraint::relate(first, predicate.relation, second)
                            .with_constant(constant)
                            .with_priority(self.priority(predicate)?),
                    );
                }
            }
        }
        Ok(())
    }

    fn size_predicate(&self, view: ViewId, dimension: Anchor, predicate: &Predicate) -> Result<Constraint, VflError> {
        let first = AnchorRef::new(view, dimension);
        let constraint = match &predicate.object {
            Object::Number(n) => Constraint::equal_to_constant(first, *n),
            Object::Name(name) => match self.metrics.get(name) {
                Some(value) => Constraint::equal_to_constant(first, *value),
                None => match self.views.get(name) {
                    Some(other) => Constraint::equal(first, AnchorRef::new(other, dimension)),
                    None => {
                        return Err(VflError::UnknownView {
                            format: self.format.to_string(),
                            name: name.clone(),
                        })
                    }
                },
            },
        };
        Ok(constraint
            .with_relation(predicate.relation)
            .with_priority(self.priority(predicate)?))
    }

    fn priority(&self, predicate: &Predicate) -> Result<Priority, VflError> {
        match &predicate.priority {
            None => Ok(Priority::REQUIRED),
            Some(Value::Number(n)) => Ok(Priority(*n)),
            Some(Value::Metric(name)) => self.metric(name).map(Priority),
        }
    }

    fn metric(&self, name: &str) -> Result<f32, VflError> {
        self.metrics.get(name).copied().ok_or_else(|| VflError::UnknownMetric {
            format: self.format.to_string(),
            name: name.to_string(),
        })
    }

    fn view(&self, name: &str) -> Result<ViewId, VflError> {
        self.views.get(name).ok_or_else(|| VflError::UnknownView {
            format: self.format.to_string(),
            name: name.to_string(),
        })
    }
}
