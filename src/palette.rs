pub type ColorValue = u8; // Color component value (0-15)
pub type ColorIdx = u8; // Index into 16-color palette (0-15)

#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct Color {
    pub red: ColorValue,
    pub green: ColorValue,
    pub blue: ColorValue,
}

impl Color {
    // Decimal component digits in RGB order, e.g. {3, 5, 10} -> "3510".
    pub fn rgb_digits(&self) -> String {
        format!("{}{}{}", self.red, self.green, self.blue)
    }

    // Decimal component digits in GRB order, the order palette data
    // statements use, e.g. {3, 5, 10} -> "5310".
    pub fn grb_digits(&self) -> String {
        format!("{}{}{}", self.green, self.red, self.blue)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Palette {
    pub colors: [Color; 16],
}
