use std::fmt::{Display, Formatter};
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::entities::{PackingResult, Placement, ShelfSide};
use crate::geometry::primitives::Point;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Line, Path, Rectangle, Text, Title};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
#[serde(default)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    pub theme: SvgTheme,
    ///Draw a line along the floor and ceiling of every shelf
    pub draw_shelves: bool,
    ///Draw the bounding box of every placed piece
    pub draw_bboxes: bool,
    ///Print the placement order in the center of every piece
    pub draw_order_labels: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgTheme::default(),
            draw_shelves: true,
            draw_bboxes: true,
            draw_order_labels: false,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgTheme {
    pub stroke_width_multiplier: f64,
    pub fabric_fill: Color,
    pub shelf_stroke: Color,
    pub bbox_stroke: Color,
}

impl Default for SvgTheme {
    fn default() -> Self {
        SvgTheme::PASTEL
    }
}

impl SvgTheme {
    pub const PASTEL: SvgTheme = SvgTheme {
        stroke_width_multiplier: 1.0,
        fabric_fill: Color(0xF4, 0xF1, 0xEA),
        shelf_stroke: Color(0x4A, 0x6F, 0xA5),
        bbox_stroke: Color(0x7A, 0x7A, 0x7A),
    };

    pub const GRAY: SvgTheme = SvgTheme {
        stroke_width_multiplier: 1.5,
        fabric_fill: Color(0xFF, 0xFF, 0xFF),
        shelf_stroke: Color(0x2D, 0x2D, 0x2D),
        bbox_stroke: Color(0x63, 0x63, 0x63),
    };
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Light color derived from `id`, identical for the same id across runs
    pub fn pastel_from_id(id: &str) -> Color {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        let [r, g, b, ..] = hasher.finish().to_le_bytes();
        // upper half of every channel
        Color(0x80 | (r >> 1), 0x80 | (g >> 1), 0x80 | (b >> 1))
    }

    pub fn darken(self, fraction: f64) -> Color {
        let Color(r, g, b) = self;
        let scale = |c: u8| (c as f64 * fraction) as u8;
        Color(scale(r), scale(g), scale(b))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<&str> for Color {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| format!("invalid color '{s}', expected #RRGGBB"))
        };
        match hex.len() {
            6 => Ok(Color(channel(0)?, channel(2)?, channel(4)?)),
            _ => Err(format!("invalid color '{s}', expected #RRGGBB")),
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Renders a [`PackingResult`] as an SVG document.
/// The fabric origin is at the bottom-left, y grows upwards.
pub fn result_to_svg(result: &PackingResult, options: SvgDrawOptions) -> Document {
    let (width, length) = (result.fabric_width, result.fabric_length);
    let theme = &options.theme;

    let pad = 0.05 * f64::max(width, length);
    let font_size = 0.4 * pad;
    let stroke_width = f64::min(width, length) * 0.002 * theme.stroke_width_multiplier;

    //maps fabric coordinates (y up) to svg coordinates (y down)
    let flip = format!("translate(0 {length}) scale(1 -1)");

    let label = {
        let label_content = format!(
            "{} | fabric: {:.1} x {:.1} | placed: {}/{} | utilization: {:.3}%",
            result.heuristic,
            width,
            length,
            result.placed_count,
            result.total_count,
            result.utilization() * 100.0,
        );
        Text::new(label_content)
            .set("x", 0.0)
            .set("y", -0.5 * pad)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let fabric = Rectangle::new()
        .set("x", 0.0)
        .set("y", 0.0)
        .set("width", width)
        .set("height", length)
        .set("fill", theme.fabric_fill.to_string())
        .set("stroke", "black")
        .set("stroke-width", 2.0 * stroke_width)
        .add(Title::new(format!("fabric: {width} x {length}")));

    let mut content = Group::new().set("id", "fabric").set("transform", flip).add(fabric);

    if options.draw_shelves {
        let mut shelf_group = Group::new().set("id", "shelves");
        for (i, shelf) in result.shelves.iter().enumerate() {
            for y in [shelf.y, shelf.y + shelf.height] {
                shelf_group = shelf_group.add(
                    Line::new()
                        .set("x1", 0.0)
                        .set("y1", y)
                        .set("x2", width)
                        .set("y2", y)
                        .set("stroke", theme.shelf_stroke.to_string())
                        .set("stroke-width", stroke_width)
                        .set("stroke-dasharray", format!("{} {}", 4.0 * stroke_width, 2.0 * stroke_width))
                        .add(Title::new(format!("shelf {i}, y: {:.3}, height: {:.3}", shelf.y, shelf.height))),
                );
            }
        }
        content = content.add(shelf_group);
    }

    let mut pieces_group = Group::new().set("id", "pieces");
    for pl in &result.placements {
        let color = Color::pastel_from_id(&pl.id);
        let mut piece_group = Group::new()
            .set("id", format!("piece_{}", pl.id))
            .add(Title::new(placement_title(pl)));

        if options.draw_bboxes {
            piece_group = piece_group.add(
                Rectangle::new()
                    .set("x", pl.x)
                    .set("y", pl.y)
                    .set("width", pl.width)
                    .set("height", pl.height)
                    .set("fill", color.to_string())
                    .set("fill-opacity", "0.25")
                    .set("stroke", theme.bbox_stroke.to_string())
                    .set("stroke-width", 0.5 * stroke_width),
            );
        }

        piece_group = piece_group.add(data_to_path(
            polygon_data(&pl.fabric_vertices()),
            &[
                ("fill", &*color.to_string()),
                ("stroke", &*color.darken(0.5).to_string()),
                ("stroke-width", &*format!("{stroke_width}")),
                ("stroke-linejoin", "round"),
            ],
        ));
        pieces_group = pieces_group.add(piece_group);
    }
    content = content.add(pieces_group);

    let mut document = Document::new()
        .set(
            "viewBox",
            (-pad, -2.0 * pad, width + 2.0 * pad, length + 3.0 * pad),
        )
        .add(content)
        .add(label);

    if options.draw_order_labels {
        //outside of the flipped group, text would be mirrored otherwise
        let mut labels = Group::new().set("id", "order_labels");
        for pl in &result.placements {
            let (cx, cy) = (pl.x + 0.5 * pl.width, pl.y + 0.5 * pl.height);
            labels = labels.add(
                Text::new(pl.order.to_string())
                    .set("x", cx)
                    .set("y", length - cy)
                    .set("font-size", f64::min(font_size, 0.5 * f64::min(pl.width, pl.height)))
                    .set("font-family", "monospace")
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "central"),
            );
        }
        document = document.add(labels);
    }

    document
}

fn placement_title(pl: &Placement) -> String {
    let slot = match pl.slot {
        Some(slot) => {
            let side = match slot.side {
                ShelfSide::Floor => "floor",
                ShelfSide::Ceiling => "ceiling",
            };
            format!(", shelf: {} ({side})", slot.shelf)
        }
        None => String::new(),
    };
    format!(
        "piece, id: {}, order: {}, pos: ({:.3}, {:.3}), rotated: {}{slot}",
        pl.id, pl.order, pl.x, pl.y, pl.rotated
    )
}

pub fn polygon_data(vertices: &[Point]) -> Data {
    let mut data = Data::new();
    for (i, &Point(x, y)) in vertices.iter().enumerate() {
        data = match i {
            0 => data.move_to((x as f32, y as f32)),
            _ => data.line_to((x as f32, y as f32)),
        };
    }
    data.close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}
