use crossterm::style::Color;

/// Colors used when printing a puzzle
#[derive(Debug, Clone)]
pub struct Theme {
    /// Grid border and labels
    pub border: Color,
    /// Blocked cells
    pub blocked: Color,
    /// Player letters not yet part of a completed word, plain by default
    pub filled: Color,
    /// Letters of completed words
    pub correct: Color,
    /// Solution letters
    pub solution: Color,
    /// Clue numbers and headings
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Rgb { r: 130, g: 140, b: 170 },
            blocked: Color::Rgb { r: 70, g: 75, b: 90 },
            filled: Color::Reset,
            correct: Color::Rgb { r: 100, g: 220, b: 120 },
            solution: Color::Rgb { r: 255, g: 200, b: 80 },
            info: Color::Rgb { r: 180, g: 180, b: 200 },
        }
    }
}
