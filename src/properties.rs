//! Static style property definitions.
//!
//! Each property pairs a name with the value definition syntax the editor
//! expands. Grammars only reference tokens from the built-in catalog.

use phf::phf_map;

/// A style property and the grammar of its legal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub syntax: &'static str,
}

const SIZE: &str = "auto | <length-percentage [0,∞]> | min-content | max-content | fit-content(<length-percentage [0,∞]>)";
const MAX_SIZE: &str = "none | <length-percentage [0,∞]> | min-content | max-content | fit-content(<length-percentage [0,∞]>)";
const INSET: &str = "auto | <length-percentage>";
const FLEX_FACTOR: &str = "<number [0,∞]>";

pub static PROPERTIES: phf::Map<&'static str, StyleDefinition> = phf_map! {
    // Sizing
    "width" => StyleDefinition { name: "width", description: "Width of the element's content box", syntax: SIZE },
    "height" => StyleDefinition { name: "height", description: "Height of the element's content box", syntax: SIZE },
    "min-width" => StyleDefinition { name: "min-width", description: "Smallest width the element may shrink to", syntax: SIZE },
    "min-height" => StyleDefinition { name: "min-height", description: "Smallest height the element may shrink to", syntax: SIZE },
    "max-width" => StyleDefinition { name: "max-width", description: "Largest width the element may grow to", syntax: MAX_SIZE },
    "max-height" => StyleDefinition { name: "max-height", description: "Largest height the element may grow to", syntax: MAX_SIZE },
    "aspect-ratio" => StyleDefinition { name: "aspect-ratio", description: "Preferred width to height ratio", syntax: "auto || <ratio>" },

    // Spacing
    "margin" => StyleDefinition { name: "margin", description: "Outer spacing, one to four sides", syntax: "[ <length-percentage> | auto ]{1,4}" },
    "padding" => StyleDefinition { name: "padding", description: "Inner spacing, one to four sides", syntax: "<length-percentage [0,∞]>{1,4}" },
    "gap" => StyleDefinition { name: "gap", description: "Row and column gutters", syntax: "<length-percentage [0,∞]>{1,2}" },

    // Positioning
    "display" => StyleDefinition {
        name: "display",
        description: "Box type generated by the element",
        syntax: "block | inline | inline-block | flex | inline-flex | grid | inline-grid | contents | none",
    },
    "position" => StyleDefinition {
        name: "position",
        description: "Positioning scheme",
        syntax: "static | relative | absolute | fixed | sticky",
    },
    "top" => StyleDefinition { name: "top", description: "Offset from the containing block's top edge", syntax: INSET },
    "right" => StyleDefinition { name: "right", description: "Offset from the containing block's right edge", syntax: INSET },
    "bottom" => StyleDefinition { name: "bottom", description: "Offset from the containing block's bottom edge", syntax: INSET },
    "left" => StyleDefinition { name: "left", description: "Offset from the containing block's left edge", syntax: INSET },
    "z-index" => StyleDefinition { name: "z-index", description: "Stacking order", syntax: "auto | <integer>" },

    // Flex
    "flex-grow" => StyleDefinition { name: "flex-grow", description: "Share of free space to grow into", syntax: FLEX_FACTOR },
    "flex-shrink" => StyleDefinition { name: "flex-shrink", description: "Share of overflow to shrink by", syntax: FLEX_FACTOR },
    "flex-basis" => StyleDefinition {
        name: "flex-basis",
        description: "Initial main size of a flex item",
        syntax: "auto | content | <length-percentage [0,∞]>",
    },

    // Visual
    "opacity" => StyleDefinition { name: "opacity", description: "Transparency of the element", syntax: "<alpha-value>" },
    "color" => StyleDefinition { name: "color", description: "Foreground text color", syntax: "<color>" },
    "background-color" => StyleDefinition { name: "background-color", description: "Background fill color", syntax: "<color>" },
    "background-image" => StyleDefinition { name: "background-image", description: "Background image layers", syntax: "none | <image>#" },
    "border" => StyleDefinition {
        name: "border",
        description: "Width, style and color of all four borders",
        syntax: "<line-width> || <line-style> || <color>",
    },
    "border-width" => StyleDefinition { name: "border-width", description: "Border width, one to four sides", syntax: "<line-width>{1,4}" },

    // Text
    "font-family" => StyleDefinition {
        name: "font-family",
        description: "Prioritized list of font family names",
        syntax: "[ <family-name> | <generic-family> ]#",
    },
    "font-size" => StyleDefinition {
        name: "font-size",
        description: "Size of the font",
        syntax: "<length-percentage [0,∞]> | xx-small | x-small | small | medium | large | x-large | xx-large | smaller | larger",
    },
    "line-height" => StyleDefinition {
        name: "line-height",
        description: "Height of a line box",
        syntax: "normal | <number [0,∞]> | <length-percentage [0,∞]>",
    },
};

/// Looks a property up by name.
pub fn property(name: &str) -> Option<&'static StyleDefinition> {
    PROPERTIES.get(name)
}

/// Every property, sorted by name.
pub fn properties() -> Vec<&'static StyleDefinition> {
    let mut all: Vec<_> = PROPERTIES.values().collect();
    all.sort_by_key(|definition| definition.name);
    all
}
