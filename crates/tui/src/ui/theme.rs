use engine::Category;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub positive: Color,
    pub error: Color,
    pub coffee: Color,
    pub books: Color,
    pub trips: Color,
}

impl Theme {
    pub fn category(&self, category: Category) -> Color {
        match category {
            Category::Coffee => self.coffee,
            Category::Books => self.books,
            Category::Trips => self.trips,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(20, 26, 32),
            border: Color::Rgb(70, 80, 90),
            border_focused: Color::Rgb(52, 152, 219),
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(52, 152, 219),
            positive: Color::Rgb(39, 174, 96),
            error: Color::Rgb(200, 80, 80),
            coffee: Color::Rgb(160, 110, 70),
            books: Color::Rgb(52, 152, 219),
            trips: Color::Rgb(39, 174, 96),
        }
    }
}
