//! ASCII art for cats.
//!
//! Every trait maps to a fixed fragment. Unknown values fall back to a
//! default fragment instead of failing, so each lookup below is a total
//! function of the (optional) trait text.

use crate::{
    diagnostics::{CadlError, Diagnostic, DiagnosticKind},
    value::{Cat, Value},
};

/// Lower-cased trait text; unset and empty values take the default.
fn normalized(value: Option<&str>, default: &str) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or(default)
        .to_lowercase()
}

pub fn ears_fragment(ears: Option<&str>) -> &'static str {
    match normalized(ears, "pointy").as_str() {
        "droopy" => " /\\_/\\_",
        "round" => " (o   o) ",
        "long" => "/\\   /\\",
        "short" => " ^   ^ ",
        _ => " /\\ /\\ ",
    }
}

pub fn eyes_for_mood(mood: Option<&str>) -> &'static str {
    match normalized(mood, "").as_str() {
        "sleepy" => "-.-",
        "happy" => "^.^",
        "excited" => "O.O",
        "loving" => "*.*",
        "angry" => "¬.¬",
        "sad" => "u.u",
        _ => "o.o",
    }
}

pub fn mouth_char(mouth: Option<&str>) -> char {
    match normalized(mouth, "neutral").as_str() {
        "smile" => 'w',
        "frown" => '_',
        "scowl" => 'x',
        "kiss" => '3',
        "open" => 'o',
        "smirk" => '/',
        _ => '.',
    }
}

/// Eyes with the middle character swapped for the mouth.
pub fn core_face(mood: Option<&str>, mouth: Option<&str>) -> String {
    eyes_for_mood(mood)
        .chars()
        .enumerate()
        .map(|(idx, ch)| if idx == 1 { mouth_char(mouth) } else { ch })
        .collect()
}

pub fn wrap_face(body: Option<&str>, face: &str) -> String {
    match normalized(body, "normal").as_str() {
        "smooth" => format!("| {face} |"),
        "fluffy" => format!("{{ {face} }}"),
        "chubby" => format!("(  {face}  )"),
        _ => format!("( {face} )"),
    }
}

pub fn whisker_pair(whiskers: Option<&str>) -> (char, char) {
    match normalized(whiskers, "long").as_str() {
        "long" => ('=', '='),
        "curled" => ('~', '~'),
        _ => ('-', '-'),
    }
}

/// `None` means the cat is drawn without a tail line. An empty tail is
/// still a tail.
pub fn tail_fragment(tail: Option<&str>) -> Option<&'static str> {
    let tail = tail?.to_lowercase();
    match tail.as_str() {
        "none" => None,
        "fluffy" => Some("~~>"),
        "curled" => Some("~~)"),
        _ => Some("-->"),
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad_right(text: &str, total: usize) -> String {
    format!("{text:<total$}")
}

/// Lays the cat out as two or three lines of equal width.
pub fn render_cat(cat: &Cat) -> String {
    let ears = ears_fragment(cat.get("ears"));
    let face = core_face(cat.get("mood"), cat.get("mouth"));
    let wrapped = wrap_face(cat.get("body"), &face);
    let (left, right) = whisker_pair(cat.get("whiskers"));

    let prefix = format!("{left} ");
    let head = format!("{prefix}{wrapped} {right}");
    let head_width = width(&head);

    let face_start = width(&prefix) as isize;
    let face_len = width(&wrapped) as isize;
    let ears_len = width(ears) as isize;
    let ear_start = ((2 * face_start + face_len - ears_len) / 2).max(0) as usize;
    let ears_line = pad_right(&format!("{}{ears}", " ".repeat(ear_start)), head_width);

    let tail = tail_fragment(cat.get("tail"));
    let total_width = match tail {
        Some(tail) => head_width.max(width(tail)),
        None => head_width,
    };

    let head_pad = " ".repeat((total_width - head_width) / 2);
    let mut lines = vec![
        pad_right(&format!("{head_pad}{ears_line}"), total_width),
        pad_right(&format!("{head_pad}{head}"), total_width),
    ];
    if let Some(tail) = tail {
        lines.push(format!("{tail:>total_width$}"));
    }
    lines.join("\n")
}

/// Renders a runtime value, rejecting anything that is not a cat.
pub fn render(value: &Value) -> Result<String, CadlError> {
    match value {
        Value::Cat(cat) => Ok(render_cat(&cat.borrow())),
        other => Err(CadlError::from(Diagnostic::new(
            DiagnosticKind::Type,
            format!("cannot draw a {} value, expected a cat", other.type_name()),
        ))),
    }
}
