use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Primary fuel of a generation facility.
///
/// Input data carries free-form strings; anything outside the known set
/// collapses to [`FuelKind::Other`], which doubles as the styling fallback.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelKind {
    Hydro,
    Gas,
    Oil,
    Coal,
    Nuclear,
    Solar,
    Wind,
    Geothermal,
    Biomass,
    Waste,
    Storage,
    Cogeneration,
    Other,
}

impl FuelKind {
    pub const ALL: [FuelKind; 13] = [
        FuelKind::Hydro,
        FuelKind::Gas,
        FuelKind::Oil,
        FuelKind::Coal,
        FuelKind::Nuclear,
        FuelKind::Solar,
        FuelKind::Wind,
        FuelKind::Geothermal,
        FuelKind::Biomass,
        FuelKind::Waste,
        FuelKind::Storage,
        FuelKind::Cogeneration,
        FuelKind::Other,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Hydro" => FuelKind::Hydro,
            "Gas" => FuelKind::Gas,
            "Oil" => FuelKind::Oil,
            "Coal" => FuelKind::Coal,
            "Nuclear" => FuelKind::Nuclear,
            "Solar" => FuelKind::Solar,
            "Wind" => FuelKind::Wind,
            "Geothermal" => FuelKind::Geothermal,
            "Biomass" => FuelKind::Biomass,
            "Waste" => FuelKind::Waste,
            "Storage" => FuelKind::Storage,
            "Cogeneration" => FuelKind::Cogeneration,
            _ => FuelKind::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FuelKind::Hydro => "Hydro",
            FuelKind::Gas => "Gas",
            FuelKind::Oil => "Oil",
            FuelKind::Coal => "Coal",
            FuelKind::Nuclear => "Nuclear",
            FuelKind::Solar => "Solar",
            FuelKind::Wind => "Wind",
            FuelKind::Geothermal => "Geothermal",
            FuelKind::Biomass => "Biomass",
            FuelKind::Waste => "Waste",
            FuelKind::Storage => "Storage",
            FuelKind::Cogeneration => "Cogeneration",
            FuelKind::Other => "Other",
        }
    }

    fn rgb8(self) -> [u8; 3] {
        match self {
            FuelKind::Hydro => [0x00, 0x77, 0xbe],
            FuelKind::Gas => [0xf2, 0x8c, 0x28],
            FuelKind::Oil => [0xa0, 0x52, 0x2d],
            FuelKind::Coal => [0x36, 0x45, 0x4f],
            FuelKind::Nuclear => [0xe6, 0x00, 0x00],
            FuelKind::Solar => [0xff, 0xda, 0x63],
            FuelKind::Wind => [0x66, 0xcc, 0xff],
            FuelKind::Geothermal => [0xbf, 0x40, 0xbf],
            FuelKind::Biomass => [0x50, 0xc8, 0x78],
            FuelKind::Waste => [0x80, 0x80, 0x80],
            FuelKind::Storage => [0xc8, 0xa2, 0xc8],
            FuelKind::Cogeneration => [0xff, 0xb3, 0xba],
            FuelKind::Other => [0xcc, 0xcc, 0xcc],
        }
    }

    pub fn color(self) -> [f32; 4] {
        let [r, g, b] = self.rgb8();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        ]
    }

    pub fn color_hex(self) -> String {
        let [r, g, b] = self.rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Icon identifier for the host UI's icon font.
    pub fn icon(self) -> &'static str {
        match self {
            FuelKind::Hydro => "fa-water",
            FuelKind::Gas => "fa-fire",
            FuelKind::Oil => "fa-oil-can",
            FuelKind::Coal => "fa-industry",
            FuelKind::Nuclear => "fa-atom",
            FuelKind::Solar => "fa-sun",
            FuelKind::Wind => "fa-wind",
            FuelKind::Geothermal => "fa-temperature-high",
            FuelKind::Biomass => "fa-leaf",
            FuelKind::Waste => "fa-trash",
            FuelKind::Storage => "fa-battery-full",
            FuelKind::Cogeneration => "fa-cogs",
            FuelKind::Other => "fa-question",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FuelKind::Hydro => "Hydroelectric power from flowing water",
            FuelKind::Gas => "Natural gas-fired power plant",
            FuelKind::Oil => "Oil-fired power plant",
            FuelKind::Coal => "Coal-fired power plant",
            FuelKind::Nuclear => "Nuclear fission power plant",
            FuelKind::Solar => "Solar photovoltaic or concentrated solar power",
            FuelKind::Wind => "Wind turbine power generation",
            FuelKind::Geothermal => "Geothermal heat-based power generation",
            FuelKind::Biomass => "Organic material combustion for power",
            FuelKind::Waste => "Waste incineration for power generation",
            FuelKind::Storage => "Energy storage facility",
            FuelKind::Cogeneration => "Combined heat and power generation",
            FuelKind::Other => "Other or unspecified power generation type",
        }
    }
}

/// Most frequent fuel in a histogram; ties break to the lowest-ordered kind.
pub fn dominant_fuel(histogram: &BTreeMap<FuelKind, u32>) -> Option<FuelKind> {
    histogram
        .iter()
        .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
        .map(|(k, _)| *k)
}
