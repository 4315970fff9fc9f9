//! Built-in catalog of CSS primitive data types.
//!
//! Keys are canonical token references. A token whose syntax canonicalizes
//! to its own key is a primitive; anything else is composed and gets
//! substituted during expansion.

use phf::{phf_map, phf_set};

/// A catalog row: defining syntax and default literal.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub syntax: &'static str,
    pub default: Option<&'static str>,
}

/// Primitive and composed tokens registered by the standard context.
pub static TOKEN_CATALOG: phf::Map<&'static str, CatalogEntry> = phf_map! {
    // Dimensions
    "<length>" => CatalogEntry { syntax: "<length>", default: Some("0px") },
    "<percentage>" => CatalogEntry { syntax: "<percentage>", default: Some("0%") },
    "<length-percentage>" => CatalogEntry { syntax: "<length> | <percentage>", default: Some("0px") },

    // Numbers
    "<number>" => CatalogEntry { syntax: "<number>", default: Some("0") },
    "<integer>" => CatalogEntry { syntax: "<integer>", default: Some("0") },
    "<ratio>" => CatalogEntry { syntax: "<number [0,∞]> [ / <number [0,∞]> ]?", default: Some("1") },
    "<alpha-value>" => CatalogEntry { syntax: "<number [0,1]> | <percentage [0,100]>", default: Some("1") },

    // Colors
    "<color>" => CatalogEntry { syntax: "<color>", default: Some("#ffffff") },

    // Links and strings
    "<url>" => CatalogEntry { syntax: "<url>", default: Some("url(\"\")") },
    "<string>" => CatalogEntry { syntax: "<string>", default: Some("\"\"") },
    "<family-name>" => CatalogEntry { syntax: "<string>", default: Some("\"\"") },
    "<generic-family>" => CatalogEntry {
        syntax: "serif | sans-serif | monospace | cursive | fantasy | system-ui",
        default: Some("sans-serif"),
    },

    // Borders
    "<line-width>" => CatalogEntry { syntax: "<length [0,∞]> | thin | medium | thick", default: Some("medium") },
    "<line-style>" => CatalogEntry {
        syntax: "none | hidden | dotted | dashed | solid | double | groove | ridge | inset | outset",
        default: Some("none"),
    },

    // Images
    "<image>" => CatalogEntry { syntax: "<url> | <gradient>", default: None },
    "<gradient>" => CatalogEntry { syntax: "linear-gradient() | radial-gradient()", default: None },

    // Functions
    "fit-content()" => CatalogEntry {
        syntax: "fit-content(<length-percentage [0,∞]>)",
        default: Some("fit-content(0px)"),
    },
    "minmax()" => CatalogEntry {
        syntax: "minmax(<length-percentage>, <length-percentage>)",
        default: Some("minmax(0px, 0px)"),
    },
    "linear-gradient()" => CatalogEntry {
        syntax: "linear-gradient(<color>, <color>)",
        default: Some("linear-gradient(#ffffff, #000000)"),
    },
    "radial-gradient()" => CatalogEntry {
        syntax: "radial-gradient(<color>, <color>)",
        default: Some("radial-gradient(#ffffff, #000000)"),
    },
};

/// Units that make a number a `<length>`.
pub static LENGTH_UNITS: phf::Set<&'static str> = phf_set! {
    "px", "em", "rem", "ex", "ch", "lh", "rlh",
    "vw", "vh", "vmin", "vmax",
    "svw", "svh", "lvw", "lvh", "dvw", "dvh",
    "cqw", "cqh", "cqi", "cqb", "cqmin", "cqmax",
    "cm", "mm", "q", "in", "pt", "pc",
};

/// CSS named colors plus the color keywords.
pub static NAMED_COLORS: phf::Set<&'static str> = phf_set! {
    "transparent", "currentcolor",
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque",
    "black", "blanchedalmond", "blue", "blueviolet", "brown", "burlywood",
    "cadetblue", "chartreuse", "chocolate", "coral", "cornflowerblue", "cornsilk",
    "crimson", "cyan", "darkblue", "darkcyan", "darkgoldenrod", "darkgray",
    "darkgreen", "darkgrey", "darkkhaki", "darkmagenta", "darkolivegreen",
    "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue",
    "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro",
    "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow", "grey",
    "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral",
    "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue",
    "lightslategray", "lightslategrey", "lightsteelblue", "lightyellow", "lime",
    "limegreen", "linen", "magenta", "maroon", "mediumaquamarine", "mediumblue",
    "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue",
    "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace",
    "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff",
    "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple", "red",
    "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen",
    "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray",
    "slategrey", "snow", "springgreen", "steelblue", "tan", "teal", "thistle",
    "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke", "yellow",
    "yellowgreen",
};
