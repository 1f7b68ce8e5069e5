use teloxide::utils::html;

const FULLWIDTH_OFFSET: u32 = 0xFEE0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignStyle {
  Bold,
  Italic,
  Mono,
  Fancy,
}

impl DesignStyle {
  pub const ALL: [DesignStyle; 4] = [Self::Bold, Self::Italic, Self::Mono, Self::Fancy];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Bold => "bold",
      Self::Italic => "italic",
      Self::Mono => "mono",
      Self::Fancy => "fancy",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|style| style.as_str() == raw)
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Bold => "𝐁 Bold",
      Self::Italic => "𝐼 Italic",
      Self::Mono => "⌨️ Mono",
      Self::Fancy => "✨ Fancy",
    }
  }

  pub fn apply(self, text: &str) -> String {
    match self {
      Self::Bold => format!("<b>{}</b>", html::escape(text)),
      Self::Italic => format!("<i>{}</i>", html::escape(text)),
      Self::Mono => format!("<code>{}</code>", html::escape(text)),
      // Every HTML-significant character is shifted out of ASCII.
      Self::Fancy => fancy(text),
    }
  }
}

pub fn fancy(text: &str) -> String {
  text.chars().map(fullwidth).collect()
}

fn fullwidth(c: char) -> char {
  match c {
    '\u{21}'..='\u{7E}' => char::from_u32(c as u32 + FULLWIDTH_OFFSET).unwrap_or(c),
    _ => c,
  }
}

#[cfg(test)]
mod tests {
  use super::DesignStyle;
  use super::fancy;

  #[test]
  fn fancy_maps_ascii_into_fullwidth() {
    assert_eq!(fancy("A"), "\u{FF21}");
    assert_eq!(fancy("!"), "\u{FF01}");
    assert_eq!(fancy("~"), "\u{FF5E}");
    assert_eq!(fancy("Hi 5"), "Ｈｉ ５");
  }

  #[test]
  fn fancy_leaves_space_and_non_ascii_alone() {
    assert_eq!(fancy(" "), " ");
    assert_eq!(fancy("é\tß"), "é\tß");
    let once = fancy("abc");
    assert_eq!(fancy(&once), once);
  }

  #[test]
  fn wraps_in_html_markup() {
    assert_eq!(DesignStyle::Bold.apply("hi"), "<b>hi</b>");
    assert_eq!(DesignStyle::Italic.apply("hi"), "<i>hi</i>");
    assert_eq!(DesignStyle::Mono.apply("hello"), "<code>hello</code>");
  }

  #[test]
  fn escapes_user_markup() {
    assert_eq!(DesignStyle::Bold.apply("a<b"), "<b>a&lt;b</b>");
    assert_eq!(DesignStyle::Fancy.apply("<&>"), "\u{FF1C}\u{FF06}\u{FF1E}");
  }

  #[test]
  fn parses_known_styles_only() {
    for style in DesignStyle::ALL {
      assert_eq!(DesignStyle::parse(style.as_str()), Some(style));
    }
    assert_eq!(DesignStyle::parse("underline"), None);
  }
}
