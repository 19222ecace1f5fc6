//! Room view codes used in room type names ("2BR OV", "1BR PH GV").

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewCode {
    pub code: &'static str,
    pub label: &'static str,
}

pub const ROOM_VIEWS: &[ViewCode] = &[
    ViewCode { code: "GV", label: "Garden View" },
    ViewCode { code: "OV", label: "Ocean View" },
    ViewCode { code: "OF", label: "Ocean Front" },
    ViewCode { code: "S", label: "Standard" },
    ViewCode { code: "IS", label: "Island Side" },
    ViewCode { code: "PS", label: "Poolside Low Floors" },
    ViewCode { code: "PSH", label: "Poolside High Floors" },
    ViewCode { code: "UF", label: "Gulf Front" },
    ViewCode { code: "UV", label: "Gulf View" },
    ViewCode { code: "US", label: "Gulf Side" },
    ViewCode { code: "PH", label: "Penthouse" },
    ViewCode { code: "PH GV", label: "Penthouse Garden View" },
    ViewCode { code: "PH OV", label: "Penthouse Ocean View" },
    ViewCode { code: "PH OF", label: "Penthouse Ocean Front" },
    ViewCode { code: "IV", label: "Island View" },
    ViewCode { code: "MG", label: "Mountain Garden" },
];

pub fn view_label(code: &str) -> Option<&'static str> {
    ROOM_VIEWS.iter().find(|v| v.code == code).map(|v| v.label)
}

/// Expand view codes in a room type name. Two-word codes win over one-word codes;
/// unknown words are kept as is.
pub fn describe_room(room: &str) -> String {
    let words: Vec<&str> = room.split_whitespace().collect();
    let mut out: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if let Some(pair) = words.get(i..i + 2) {
            if let Some(label) = view_label(&pair.join(" ")) {
                out.push(label);
                i += 2;
                continue;
            }
        }
        out.push(view_label(words[i]).unwrap_or(words[i]));
        i += 1;
    }
    out.join(" ")
}
