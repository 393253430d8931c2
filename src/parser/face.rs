//! Face line grammars and vertex index resolution

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// One corner of a face as written in the document
///
/// Indices are raw: 1-based when positive, relative to the end of the pool
/// when negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    /// Position index
    pub position: i64,
    /// Texture coordinate index
    pub uv: Option<i64>,
    /// Normal index
    pub normal: Option<i64>,
}

/// The corners of a triangle or quad, tagged with the reference form used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceRefs {
    /// `p/t/n`
    PositionUvNormal(Vec<(i64, i64, i64)>),
    /// `p/t`
    PositionUv(Vec<(i64, i64)>),
    /// `p//n`
    PositionNormal(Vec<(i64, i64)>),
    /// `p`
    Position(Vec<i64>),
}

impl FaceRefs {
    /// Number of corners (3 or 4)
    pub fn len(&self) -> usize {
        match self {
            FaceRefs::PositionUvNormal(v) => v.len(),
            FaceRefs::PositionUv(v) | FaceRefs::PositionNormal(v) => v.len(),
            FaceRefs::Position(v) => v.len(),
        }
    }

    /// Whether the face has no corners
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The corners in document order
    pub fn corners(&self) -> Vec<VertexRef> {
        match self {
            FaceRefs::PositionUvNormal(v) => v
                .iter()
                .map(|&(p, t, n)| VertexRef { position: p, uv: Some(t), normal: Some(n) })
                .collect(),
            FaceRefs::PositionUv(v) => v
                .iter()
                .map(|&(p, t)| VertexRef { position: p, uv: Some(t), normal: None })
                .collect(),
            FaceRefs::PositionNormal(v) => v
                .iter()
                .map(|&(p, n)| VertexRef { position: p, uv: None, normal: Some(n) })
                .collect(),
            FaceRefs::Position(v) => v
                .iter()
                .map(|&p| VertexRef { position: p, uv: None, normal: None })
                .collect(),
        }
    }

    /// Corner triples for the output triangles; quads become a fan around the first corner
    pub fn triangles(&self) -> &'static [[usize; 3]] {
        if self.len() == 4 {
            &[[0, 1, 2], [0, 2, 3]]
        } else {
            &[[0, 1, 2]]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    PositionUvNormal,
    PositionUv,
    PositionNormal,
    Position,
}

impl Form {
    /// Number of capture groups per corner
    fn arity(self) -> usize {
        match self {
            Form::PositionUvNormal => 3,
            Form::PositionUv | Form::PositionNormal => 2,
            Form::Position => 1,
        }
    }
}

const INDEX: &str = r"-?\d+";

fn grammar(form: Form) -> Regex {
    let corner = match form {
        Form::PositionUvNormal => format!("({i})/({i})/({i})", i = INDEX),
        Form::PositionUv => format!("({i})/({i})", i = INDEX),
        Form::PositionNormal => format!("({i})//({i})", i = INDEX),
        Form::Position => format!("({i})", i = INDEX),
    };
    // the trailing run only needs to be detected, not captured per corner
    let extra = corner.replace('(', "(?:");
    let pattern = format!(
        r"^f\s+{c}\s+{c}\s+{c}(?:\s+{c})?((?:\s+{e})+)?\s*$",
        c = corner,
        e = extra
    );
    Regex::new(&pattern).expect("face grammar is a valid regex")
}

static GRAMMARS: LazyLock<[(Form, Regex); 4]> = LazyLock::new(|| {
    [
        Form::PositionUvNormal,
        Form::PositionUv,
        Form::PositionNormal,
        Form::Position,
    ]
    .map(|form| (form, grammar(form)))
});

/// Parse an `f` line into its corner references
///
/// The grammars are tried in the order `p/t/n`, `p/t`, `p//n`, `p` and the
/// first full-line match wins. A trailing `#` comment is ignored. Faces
/// with five or more corners are rejected as unsupported; lines matching no
/// grammar are syntax errors.
pub fn parse_face(line: &str) -> Result<FaceRefs> {
    let line = line.split_once('#').map_or(line, |(body, _)| body).trim();
    let (form, captures) = GRAMMARS
        .iter()
        .find_map(|(form, regex)| regex.captures(line).map(|c| (*form, c)))
        .ok_or_else(|| Error::directive("f", &format!("malformed face '{}'", line)))?;

    let arity = form.arity();
    if captures.get(1 + 4 * arity).is_some() {
        let corners = line.split_whitespace().count() - 1;
        return Err(Error::Unsupported(format!(
            "face with {} vertices (only triangles and quads are supported)",
            corners
        )));
    }

    let corners = if captures.get(1 + 3 * arity).is_some() { 4 } else { 3 };
    let field = |corner: usize, component: usize| index_at(&captures, 1 + corner * arity + component);

    let refs = match form {
        Form::PositionUvNormal => FaceRefs::PositionUvNormal(
            (0..corners)
                .map(|c| -> Result<_> { Ok((field(c, 0)?, field(c, 1)?, field(c, 2)?)) })
                .collect::<Result<_>>()?,
        ),
        Form::PositionUv => FaceRefs::PositionUv(
            (0..corners)
                .map(|c| -> Result<_> { Ok((field(c, 0)?, field(c, 1)?)) })
                .collect::<Result<_>>()?,
        ),
        Form::PositionNormal => FaceRefs::PositionNormal(
            (0..corners)
                .map(|c| -> Result<_> { Ok((field(c, 0)?, field(c, 1)?)) })
                .collect::<Result<_>>()?,
        ),
        Form::Position => FaceRefs::Position(
            (0..corners).map(|c| field(c, 0)).collect::<Result<_>>()?,
        ),
    };
    Ok(refs)
}

fn index_at(captures: &Captures<'_>, group: usize) -> Result<i64> {
    let text = captures.get(group).map(|m| m.as_str()).unwrap_or_default();
    text.parse::<i64>()
        .map_err(|_| Error::parse_error_with_context("f", text, "vertex index"))
}

/// Resolve a raw document index against a pool of `len` elements
///
/// Positive indices are 1-based; zero and negative indices count back from
/// the end of the pool as it is at the current line.
pub fn resolve_index(raw: i64, len: usize, pool: &str) -> Result<usize> {
    let resolved = if raw > 0 {
        raw - 1
    } else {
        len as i64 + raw
    };
    if resolved < 0 || resolved >= len as i64 {
        return Err(Error::InvalidIndex(format!(
            "{} index {} is outside the {} element(s) defined so far",
            pool, raw, len
        )));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_only_triangle() {
        let face = parse_face("f 1 2 3").unwrap();
        assert_eq!(face, FaceRefs::Position(vec![1, 2, 3]));
        assert_eq!(face.triangles(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_full_quad() {
        let face = parse_face("f 1/1/1 2/2/1 3/3/1 4/4/1").unwrap();
        assert_eq!(face.len(), 4);
        assert_eq!(face.triangles(), &[[0, 1, 2], [0, 2, 3]]);
        let corners = face.corners();
        assert_eq!(
            corners[3],
            VertexRef { position: 4, uv: Some(4), normal: Some(1) }
        );
    }

    #[test]
    fn test_position_uv_and_position_normal() {
        assert_eq!(
            parse_face("f 1/2 3/4 5/6").unwrap(),
            FaceRefs::PositionUv(vec![(1, 2), (3, 4), (5, 6)])
        );
        assert_eq!(
            parse_face("f 1//2 3//4 5//6").unwrap(),
            FaceRefs::PositionNormal(vec![(1, 2), (3, 4), (5, 6)])
        );
    }

    #[test]
    fn test_negative_indices_and_whitespace() {
        let face = parse_face("  f\t-3 -2   -1  ").unwrap();
        assert_eq!(face, FaceRefs::Position(vec![-3, -2, -1]));
    }

    #[test]
    fn test_trailing_comment_is_ignored() {
        let face = parse_face("f 1 2 3 # seam").unwrap();
        assert_eq!(face, FaceRefs::Position(vec![1, 2, 3]));

        let face = parse_face("f 1/1/1 2/2/1 3/3/1 4/4/1#quad").unwrap();
        assert_eq!(face.len(), 4);

        let err = parse_face("f 1 2 # 3").unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
    }

    #[test]
    fn test_ngon_is_unsupported() {
        let err = parse_face("f 1 2 3 4 5").unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
        assert!(err.to_string().contains("5 vertices"));

        let err = parse_face("f 1//1 2//1 3//1 4//1 5//1 6//1").unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn test_malformed_faces() {
        for line in ["f 1 2", "f 1/2/3 2/3/4 3", "f a b c", "f 1 2 3 x", "f"] {
            let err = parse_face(line).unwrap_err();
            assert!(matches!(err, Error::Syntax(_)), "{line}");
        }
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(1, 3, "position").unwrap(), 0);
        assert_eq!(resolve_index(3, 3, "position").unwrap(), 2);
        assert_eq!(resolve_index(-1, 3, "position").unwrap(), 2);
        assert_eq!(resolve_index(-3, 3, "position").unwrap(), 0);

        for raw in [4, -4, 0] {
            let err = resolve_index(raw, 3, "position").unwrap_err();
            assert!(matches!(err, Error::InvalidIndex(_)));
        }
        assert!(resolve_index(1, 0, "normal").is_err());
    }
}
