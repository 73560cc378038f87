/// Reader and writer for the comma separated shape description format
///
/// ```text
/// num_vertices,num_edges[,num_faces]
/// x,y,z            (num_vertices lines)
/// a,b              (num_edges lines)
/// i,j,k[,...]      (num_faces lines, vertex loop in boundary order)
/// ```
///
/// Blank lines are skipped wherever they appear. Indices are not checked
/// here; `Shape::from_description` validates them against the vertex count.
use std::fmt;

use nom::{
    character::complete::{char, space0, u64 as index},
    combinator::{all_consuming, map, map_res, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, tuple},
    IResult,
};

use tracing::debug;

use crate::error::{LoadError, LoadResult, Section};
use crate::vector::Point;

/// Unvalidated contents of a shape description
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeDescription {
    pub vertices: Vec<Point>,
    pub edges: Vec<(usize, usize)>,
    pub faces: Vec<Vec<usize>>,
}

/// Declared item counts from the header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub num_vertices: usize,
    pub num_edges: usize,
    pub num_faces: usize,
}

/// Parse a full description.
///
/// `limits` is `(max_vertices, max_edges, max_faces)`; declared counts above
/// them are rejected before anything is allocated.
pub fn parse_description(input: &str, limits: (usize, usize, usize)) -> LoadResult<ShapeDescription> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, text) = lines.next().ok_or(LoadError::ShortRead {
        section: Section::Header,
        expected: 1,
        found: 0,
    })?;
    let header = parse_line(text, header_line, Section::Header, line_no)?;
    check_limits(&header, limits)?;

    let mut desc = ShapeDescription::default();
    reserve(&mut desc.vertices, header.num_vertices, Section::Vertices)?;
    reserve(&mut desc.edges, header.num_edges, Section::Edges)?;
    reserve(&mut desc.faces, header.num_faces, Section::Faces)?;

    for found in 0..header.num_vertices {
        let (line_no, text) = lines.next().ok_or(LoadError::ShortRead {
            section: Section::Vertices,
            expected: header.num_vertices,
            found,
        })?;
        desc.vertices.push(parse_line(text, vertex_line, Section::Vertices, line_no)?);
    }

    for found in 0..header.num_edges {
        let (line_no, text) = lines.next().ok_or(LoadError::ShortRead {
            section: Section::Edges,
            expected: header.num_edges,
            found,
        })?;
        desc.edges.push(parse_line(text, edge_line, Section::Edges, line_no)?);
    }

    for found in 0..header.num_faces {
        let (line_no, text) = lines.next().ok_or(LoadError::ShortRead {
            section: Section::Faces,
            expected: header.num_faces,
            found,
        })?;
        desc.faces.push(parse_line(text, face_line, Section::Faces, line_no)?);
    }

    if let Some((line_no, _)) = lines.next() {
        debug!(line = line_no, "ignoring trailing lines after shape description");
    }

    Ok(desc)
}

fn check_limits(header: &Header, (max_v, max_e, max_f): (usize, usize, usize)) -> LoadResult<()> {
    let checks = [
        (Section::Vertices, header.num_vertices, max_v),
        (Section::Edges, header.num_edges, max_e),
        (Section::Faces, header.num_faces, max_f),
    ];
    for (section, count, max) in checks {
        if count > max {
            return Err(LoadError::TooMany { section, count, max });
        }
    }
    Ok(())
}

fn reserve<T>(vec: &mut Vec<T>, count: usize, section: Section) -> LoadResult<()> {
    vec.try_reserve_exact(count)
        .map_err(|_| LoadError::Allocation { section, count })
}

fn parse_line<T>(
    text: &str,
    parser: fn(&str) -> IResult<&str, T>,
    section: Section,
    line: usize,
) -> LoadResult<T> {
    match all_consuming(parser)(text) {
        Ok((_, value)) => Ok(value),
        Err(_) => Err(LoadError::Malformed {
            section,
            line,
            text: text.to_string(),
        }),
    }
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

fn usize_value(input: &str) -> IResult<&str, usize> {
    map_res(index, usize::try_from)(input)
}

fn header_line(input: &str) -> IResult<&str, Header> {
    map(
        tuple((
            usize_value,
            preceded(comma, usize_value),
            opt(preceded(comma, usize_value)),
        )),
        |(num_vertices, num_edges, num_faces)| Header {
            num_vertices,
            num_edges,
            num_faces: num_faces.unwrap_or(0),
        },
    )(input)
}

fn vertex_line(input: &str) -> IResult<&str, Point> {
    map(
        tuple((double, preceded(comma, double), preceded(comma, double))),
        |(x, y, z)| Point::new(x, y, z),
    )(input)
}

fn edge_line(input: &str) -> IResult<&str, (usize, usize)> {
    tuple((usize_value, preceded(comma, usize_value)))(input)
}

fn face_line(input: &str) -> IResult<&str, Vec<usize>> {
    separated_list1(comma, usize_value)(input)
}

impl fmt::Display for ShapeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{},{},{}", self.vertices.len(), self.edges.len(), self.faces.len())?;
        for v in &self.vertices {
            writeln!(f, "{},{},{}", v.x, v.y, v.z)?;
        }
        for (a, b) in &self.edges {
            writeln!(f, "{a},{b}")?;
        }
        if !self.faces.is_empty() {
            writeln!(f)?;
        }
        for face in &self.faces {
            let loop_text: Vec<String> = face.iter().map(|i| i.to_string()).collect();
            writeln!(f, "{}", loop_text.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: (usize, usize, usize) = (100, 100, 100);

    const TRIANGLE: &str = "3, 3, 1\n\
                            0.0, 1.0, 0.0\n\
                            -1.0, -1.0, 0.5\n\
                            1.0, -1.0, -0.5\n\
                            0, 1\n\
                            1, 2\n\
                            2, 0\n\
                            \n\
                            0, 1, 2\n";

    #[test]
    fn test_parse_triangle() {
        let desc = parse_description(TRIANGLE, LIMITS).unwrap();
        assert_eq!(desc.vertices.len(), 3);
        assert_eq!(desc.vertices[1], Point::new(-1.0, -1.0, 0.5));
        assert_eq!(desc.edges, vec![(0, 1), (1, 2), (2, 0)]);
        assert_eq!(desc.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_faces_default_to_zero() {
        let desc = parse_description("2,1\n0,0,0\n1,1,1\n0,1\n", LIMITS).unwrap();
        assert!(desc.faces.is_empty());
        assert_eq!(desc.edges, vec![(0, 1)]);
    }

    #[test]
    fn test_variable_length_face() {
        let input = "4,0,1\n0,0,0\n1,0,0\n1,1,0\n0,1,0\n0,1,2,3\n";
        let desc = parse_description(input, LIMITS).unwrap();
        assert_eq!(desc.faces[0], vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_short_read() {
        let err = parse_description("3,0\n0,0,0\n1,1,1\n", LIMITS).unwrap_err();
        assert!(matches!(
            err,
            LoadError::ShortRead {
                section: Section::Vertices,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let err = parse_description("2,0\n0,0,0\n1,oops,1\n", LIMITS).unwrap_err();
        match err {
            LoadError::Malformed { section, line, .. } => {
                assert_eq!(section, Section::Vertices);
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_header() {
        let err = parse_description("three,two\n", LIMITS).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { section: Section::Header, .. }));
    }

    #[test]
    fn test_index_wider_than_usize_is_malformed() {
        let huge = "4294967296";
        #[cfg(target_pointer_width = "32")]
        assert!(usize_value(huge).is_err());
        #[cfg(target_pointer_width = "64")]
        assert_eq!(usize_value(huge), Ok(("", 4_294_967_296)));

        let err = parse_description("2,1\n0,0,0\n1,1,1\n0,18446744073709551616\n", LIMITS)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Malformed {
                section: Section::Edges,
                line: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_count_limit() {
        let err = parse_description("200,0\n", LIMITS).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooMany {
                section: Section::Vertices,
                count: 200,
                max: 100
            }
        ));
    }

    #[test]
    fn test_write_then_parse() {
        let desc = parse_description(TRIANGLE, LIMITS).unwrap();
        let text = desc.to_string();
        assert_eq!(parse_description(&text, LIMITS).unwrap(), desc);
    }
}
