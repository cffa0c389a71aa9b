// File: wardrobot-core/src/color/mod.rs
//
// Color compatibility rules. The tables are fixed configuration data; nothing
// here touches storage, so combination checks are pure and deterministic.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use wardrobot_common::models::ClothingItem;

/// Semantic color groups and the specific color names that fall into each,
/// as produced by the dominant-color estimator.
pub const COLOR_GROUPS: &[(&str, &[&str])] = &[
    (
        "Red",
        &["Red", "Maroon", "Crimson", "DarkRed", "FireBrick", "IndianRed", "LightCoral"],
    ),
    (
        "Blue",
        &[
            "Blue", "Navy", "LightBlue", "SkyBlue", "MidnightBlue", "CadetBlue", "RoyalBlue",
            "DenimBlue", "SlateBlue", "SteelBlue", "DodgerBlue", "DeepSkyBlue",
            "PowderBlue", "LightSteelBlue", "MediumBlue",
        ],
    ),
    (
        "Pink",
        &[
            "Pink", "LightPink", "HotPink", "DeepPink", "Salmon",
            "Magenta", "MediumVioletRed", "PaleVioletRed",
        ],
    ),
    (
        "Purple",
        &[
            "Purple", "Lavender", "Plum", "Orchid", "Violet", "DarkPurple",
            "Eggplant", "DarkViolet", "BlueViolet", "RebeccaPurple", "MediumPurple",
        ],
    ),
    (
        "Yellow",
        &["Yellow", "LightYellow", "Gold", "Goldenrod", "LemonChiffon"],
    ),
    (
        "Green",
        &[
            "Green", "LimeGreen", "DarkGreen", "ForestGreen", "PaleGreen",
            "SeaGreen", "MintGreen", "MediumSeaGreen", "LightGreen",
            "Olive", "Khaki", "DarkOliveGreen", "YellowGreen",
        ],
    ),
    (
        "Orange",
        &["Orange", "Coral", "DarkOrange", "PeachPuff", "LightSalmon"],
    ),
    (
        "Brown",
        &["Brown", "Tan", "Chocolate", "BurlyWood", "Sienna", "RosyBrown", "Peru"],
    ),
    (
        "Neutrals",
        &[
            "Black", "White", "DarkGray", "LightGray", "Charcoal", "Gainsboro", "Gray", "Silver",
            "DimGray", "SlateGray", "Ivory", "Beige", "Snow",
        ],
    ),
];

/// Unordered group pairs that never look good together.
pub const INCOMPATIBLE_GROUPS: &[(&str, &str)] = &[
    ("Red", "Pink"),
    ("Red", "Orange"),
    ("Purple", "Green"),
    ("Green", "Pink"),
    ("Brown", "Gray"),
    ("Yellow", "Pink"),
    ("Purple", "Orange"),
    ("Green", "Orange"),
    ("Pink", "Brown"),
];

static GROUP_BY_COLOR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (group, colors) in COLOR_GROUPS {
        for color in *colors {
            index.insert(*color, *group);
        }
    }
    index
});

/// The semantic group a color name belongs to, or `None` for colors outside
/// the taxonomy (those impose no compatibility constraint).
pub fn color_group(color: &str) -> Option<&'static str> {
    GROUP_BY_COLOR.get(color).copied()
}

/// The member colors of a group, used to expand a group-name browse filter.
pub fn group_members(group: &str) -> Option<&'static [&'static str]> {
    COLOR_GROUPS
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, colors)| *colors)
}

fn groups_clash(a: &str, b: &str) -> bool {
    INCOMPATIBLE_GROUPS
        .iter()
        .any(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))
}

#[derive(Debug, Clone)]
pub struct ColorCheck {
    pub valid: bool,
    pub reason: Option<String>,
}

impl ColorCheck {
    fn ok() -> Self {
        Self { valid: true, reason: None }
    }

    fn conflict(g1: &str, g2: &str) -> Self {
        Self {
            valid: false,
            reason: Some(format!("Conflict between {} and {} colors", g1, g2)),
        }
    }
}

/// Checks whether the items' color groups can be worn together. Only the
/// first clashing pair is reported, in the order the groups were first
/// encountered in the item list.
pub fn check_combination(items: &[ClothingItem]) -> ColorCheck {
    let mut groups: Vec<&'static str> = Vec::new();
    for item in items {
        if let Some(group) = color_group(&item.color) {
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
    }

    for i in 0..groups.len() {
        for j in (i + 1)..groups.len() {
            if groups_clash(groups[i], groups[j]) {
                return ColorCheck::conflict(groups[i], groups[j]);
            }
        }
    }

    ColorCheck::ok()
}
