use super::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Korean,
}

impl Language {
    pub const fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Korean => "한국어",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct I18n {
    language: Language,
}

impl I18n {
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    fn pick<'a>(self, english: &'a str, korean: &'a str) -> &'a str {
        match self.language {
            Language::English => english,
            Language::Korean => korean,
        }
    }

    pub fn theme_label(self, theme: Theme) -> &'static str {
        match (theme, self.language) {
            (Theme::Dark, Language::English) => "Dark",
            (Theme::Dark, Language::Korean) => "어두운 테마",
            (Theme::Light, Language::English) => "Light",
            (Theme::Light, Language::Korean) => "밝은 테마",
        }
    }

    pub fn heading(self) -> &'static str {
        self.pick("Cafe Launcher", "카페 런처")
    }

    pub fn discord_label(self) -> &'static str {
        self.pick("Discord", "디스코드")
    }

    pub fn cafe_label(self) -> &'static str {
        self.pick("Cafe", "카페")
    }

    pub fn notify_heading(self) -> &'static str {
        self.pick("Notices", "공지사항")
    }

    pub fn notify_loading(self) -> &'static str {
        self.pick("Loading cafe posts...", "카페 글을 불러오는 중...")
    }

    pub fn notify_empty(self) -> &'static str {
        self.pick("No posts yet.", "게시글이 없습니다.")
    }

    pub fn notify_failed(self, err: &str) -> String {
        match self.language {
            Language::English => format!("Could not load cafe posts: {err}"),
            Language::Korean => format!("카페 글을 불러오지 못했습니다: {err}"),
        }
    }

    pub fn launch_button(self) -> &'static str {
        self.pick("Launch", "게임 시작")
    }

    pub fn launching(self) -> &'static str {
        self.pick("Starting game...", "게임을 시작하는 중...")
    }

    pub fn launch_failed(self, err: &str) -> String {
        match self.language {
            Language::English => format!("Launch failed: {err}"),
            Language::Korean => format!("실행 실패: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_labels_per_language() {
        assert_eq!(I18n::new(Language::English).launch_button(), "Launch");
        assert_eq!(I18n::new(Language::Korean).launch_button(), "게임 시작");
        assert_eq!(
            I18n::new(Language::Korean).theme_label(Theme::Light),
            "밝은 테마"
        );
    }
}
