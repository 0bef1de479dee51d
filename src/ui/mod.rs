use std::fs;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{
    self, Align, Color32, CornerRadius, FontData, FontDefinitions, FontFamily, Frame, Layout,
    Margin, RichText, Stroke, Vec2,
};
use log::{debug, error, info, warn};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{Mutex, mpsc};

use crate::crawler::{Article, Crawler};
use crate::engine::LauncherEngine;
use crate::engine::state::{AppState, UserAction};
use crate::process::ProcessLauncher;
use crate::storage::LauncherConfig;

mod i18n;
pub mod view;

use self::i18n::{I18n, Language};
use self::view::{ExternalOpener, LaunchView, NotifyBoard, SystemOpener, open_external};

const HANGUL_FONT_ID: &str = "hangul";
const HANGUL_FONT_CANDIDATES: [&str; 6] = [
    "C:\\Windows\\Fonts\\malgun.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
];
const BACKGROUND_REPAINT: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ThemePalette {
    bg: Color32,
    panel: Color32,
    surface: Color32,
    surface_elev: Color32,
    border: Color32,
    text_primary: Color32,
    text_muted: Color32,
    accent: Color32,
    accent_soft: Color32,
    danger: Color32,
}

impl ThemePalette {
    const fn dark() -> Self {
        Self {
            bg: Color32::from_rgb(11, 14, 19),
            panel: Color32::from_rgb(17, 22, 29),
            surface: Color32::from_rgb(24, 31, 39),
            surface_elev: Color32::from_rgb(29, 37, 47),
            border: Color32::from_rgb(45, 57, 72),
            text_primary: Color32::from_rgb(228, 235, 244),
            text_muted: Color32::from_rgb(167, 182, 197),
            accent: Color32::from_rgb(92, 219, 195),
            accent_soft: Color32::from_rgb(63, 140, 125),
            danger: Color32::from_rgb(239, 117, 117),
        }
    }

    const fn light() -> Self {
        Self {
            bg: Color32::from_rgb(240, 245, 252),
            panel: Color32::from_rgb(226, 234, 243),
            surface: Color32::from_rgb(245, 249, 255),
            surface_elev: Color32::from_rgb(255, 255, 255),
            border: Color32::from_rgb(195, 205, 221),
            text_primary: Color32::from_rgb(28, 38, 52),
            text_muted: Color32::from_rgb(80, 99, 121),
            accent: Color32::from_rgb(27, 170, 152),
            accent_soft: Color32::from_rgb(152, 223, 212),
            danger: Color32::from_rgb(219, 83, 83),
        }
    }
}

impl Theme {
    const fn palette(self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette::dark(),
            Theme::Light => ThemePalette::light(),
        }
    }
}

const LOCALE_LANGUAGE_CODES: [(&[&str], Language); 2] = [
    (&["ko", "kor"], Language::Korean),
    (&["en", "eng"], Language::English),
];

fn parse_locale_token(token: &str) -> Option<Language> {
    let normalized = token
        .split(|c| matches!(c, '.' | '@'))
        .next()
        .unwrap_or(token)
        .replace('-', "_")
        .to_ascii_lowercase();
    let language_code = normalized.split('_').next().unwrap_or(&normalized);

    LOCALE_LANGUAGE_CODES.iter().find_map(|(codes, language)| {
        codes
            .iter()
            .any(|code| *code == language_code)
            .then_some(*language)
    })
}

fn detect_language(configured: Option<&str>) -> Language {
    if let Some(language) = configured.and_then(parse_locale_token) {
        return language;
    }
    for var in ["LC_ALL", "LANGUAGE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            for token in value.split(':') {
                if let Some(language) = parse_locale_token(token) {
                    return language;
                }
            }
        }
    }

    Language::English
}

#[cfg(test)]
mod tests {
    use super::{Language, detect_language, parse_locale_token};

    #[test]
    fn parses_supported_languages_from_locale_tokens() {
        let samples = [
            ("ko_KR.UTF-8", Language::Korean),
            ("ko-KR", Language::Korean),
            ("kor", Language::Korean),
            ("en_US.UTF-8", Language::English),
            ("eng_US", Language::English),
        ];

        for (token, expected) in samples {
            assert_eq!(parse_locale_token(token), Some(expected));
        }
    }

    #[test]
    fn ignores_unknown_language_tokens() {
        assert_eq!(parse_locale_token("pl_PL"), None);
    }

    #[test]
    fn configured_language_wins() {
        assert_eq!(detect_language(Some("ko")), Language::Korean);
    }
}

fn section_frame(colors: &ThemePalette) -> Frame {
    Frame::new()
        .fill(colors.surface)
        .stroke(Stroke::new(1.0, colors.border))
        .corner_radius(CornerRadius::same(14))
        .inner_margin(Margin::same(14))
}

fn elevated_frame(colors: &ThemePalette) -> Frame {
    Frame::new()
        .fill(colors.surface_elev)
        .stroke(Stroke::new(1.0, colors.border))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(Margin::symmetric(12, 10))
}

fn primary_cta_button(label: RichText, colors: &ThemePalette, min_width: f32) -> egui::Button<'_> {
    egui::Button::new(label)
        .fill(colors.accent_soft)
        .stroke(Stroke::new(1.0, colors.accent))
        .min_size(Vec2::new(min_width, 34.0))
}

/// Add a system Hangul font so crawled Korean text renders. The first
/// readable candidate wins; without one egui falls back to its own fonts.
fn setup_custom_fonts(ctx: &egui::Context) {
    let Some(bytes) = HANGUL_FONT_CANDIDATES
        .iter()
        .find_map(|path| fs::read(path).ok())
    else {
        warn!("ui: no Hangul font found; Korean text may not render");
        return;
    };

    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        HANGUL_FONT_ID.to_owned(),
        Arc::new(FontData::from_owned(bytes)),
    );
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(HANGUL_FONT_ID.to_owned());
    }
    ctx.set_fonts(fonts);
}

fn apply_theme(ctx: &egui::Context, colors: &ThemePalette) {
    let mut visuals = if colors == &ThemePalette::dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.panel_fill = colors.bg;
    visuals.window_fill = visuals.panel_fill;
    visuals.override_text_color = Some(colors.text_primary);
    visuals.hyperlink_color = colors.accent;
    visuals.selection.bg_fill = colors.accent;
    ctx.set_visuals(visuals);
}

fn build_runtime() -> Arc<Runtime> {
    match Runtime::new() {
        Ok(rt) => Arc::new(rt),
        Err(err) => {
            warn!(
                "ui: failed to create multithreaded runtime ({}); trying single-threaded runtime",
                err
            );
            match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => Arc::new(rt),
                Err(fallback_err) => {
                    error!(
                        "ui: failed to create any Tokio runtime ({}); terminating launcher",
                        fallback_err
                    );
                    std::process::exit(1);
                }
            }
        }
    }
}

#[derive(Debug)]
enum NotifyUpdate {
    Results(Vec<Article>),
    Error(String),
}

pub struct LauncherApp {
    runtime: Arc<Runtime>,
    engine: Arc<Mutex<LauncherEngine>>,
    updates_rx: mpsc::UnboundedReceiver<AppState>,
    updates_tx: mpsc::UnboundedSender<AppState>,
    state: AppState,
    config: LauncherConfig,
    opener: Box<dyn ExternalOpener>,
    language: Language,
    theme: Theme,
    launch: LaunchView,
    notify: NotifyBoard,
    notify_loading: bool,
    notify_error: Option<String>,
    notify_updates_rx: mpsc::UnboundedReceiver<NotifyUpdate>,
}

impl LauncherApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: LauncherConfig) -> Self {
        let runtime = build_runtime();
        setup_custom_fonts(&cc.egui_ctx);

        let engine = LauncherEngine::new(ProcessLauncher::new(), config.clone());
        let engine = Arc::new(Mutex::new(engine));
        let (tx, rx) = mpsc::unbounded_channel();
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();

        let crawler = Crawler::spawn_on(
            runtime.handle(),
            reqwest::Client::new(),
            config.listing_url.clone(),
        );
        let repaint_ctx = cc.egui_ctx.clone();
        runtime.spawn(async move {
            let update = match crawler.article_list().await {
                Ok(articles) => NotifyUpdate::Results(articles),
                Err(err) => {
                    error!("ui: cafe posts unavailable: {err}");
                    NotifyUpdate::Error(err.to_string())
                }
            };
            let _ = notify_tx.send(update);
            repaint_ctx.request_repaint();
        });

        let language = detect_language(config.language.as_deref());
        info!("ui: starting with language {}", language.display_name());

        Self {
            runtime,
            engine,
            updates_rx: rx,
            updates_tx: tx,
            state: AppState::Idle,
            config,
            opener: Box::new(SystemOpener),
            language,
            theme: Theme::Dark,
            launch: LaunchView::default(),
            notify: NotifyBoard::default(),
            notify_loading: true,
            notify_error: None,
            notify_updates_rx: notify_rx,
        }
    }

    fn colors(&self) -> ThemePalette {
        self.theme.palette()
    }

    fn i18n(&self) -> I18n {
        I18n::new(self.language)
    }

    fn trigger_action(&self, action: UserAction) {
        let engine = self.engine.clone();
        let tx = self.updates_tx.clone();
        self.runtime.spawn(async move {
            let mut locked = engine.lock().await;
            locked.handle_action(action, &tx);
        });
    }

    fn sync_state(&mut self) {
        while let Ok(state) = self.updates_rx.try_recv() {
            if let AppState::Launching { progress } = state {
                self.launch.update_progress(progress);
            }
            self.state = state;
        }
    }

    fn sync_notify_updates(&mut self) {
        while let Ok(update) = self.notify_updates_rx.try_recv() {
            self.notify_loading = false;
            match update {
                NotifyUpdate::Results(articles) => {
                    debug!("ui: rendering {} cafe post(s)", articles.len());
                    self.notify.render_articles(&articles);
                    self.notify_error = None;
                }
                NotifyUpdate::Error(err) => {
                    self.notify_error = Some(err);
                }
            }
        }
    }

    fn render_nav(&self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        let links = [
            (i18n.cafe_label(), Some(self.config.cafe_link())),
            (i18n.discord_label(), self.config.discord_link()),
        ];
        for (label, url) in links.into_iter().filter_map(|(label, url)| Some((label, url?))) {
            let text = RichText::new(label).color(colors.text_primary).strong();
            if ui.add(primary_cta_button(text, colors, 96.0)).clicked() {
                open_external(self.opener.as_ref(), url);
            }
        }
    }

    fn render_notify(&self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        section_frame(colors).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(i18n.notify_heading());
                if self.notify_loading {
                    ui.add(egui::Spinner::new());
                    ui.label(
                        RichText::new(i18n.notify_loading())
                            .color(colors.text_muted)
                            .small(),
                    );
                }
            });
            ui.separator();

            if let Some(err) = &self.notify_error {
                ui.colored_label(colors.danger, i18n.notify_failed(err));
            }

            if self.notify.items().is_empty() {
                if !self.notify_loading {
                    ui.label(i18n.notify_empty());
                }
                return;
            }

            for item in self.notify.items() {
                let response = elevated_frame(colors)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&item.title).strong().color(colors.accent));
                            ui.label(RichText::new(&item.body).color(colors.text_muted));
                        });
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                if response.clicked() {
                    open_external(self.opener.as_ref(), &item.href);
                }
            }
        });
    }

    fn render_launch(&mut self, ui: &mut egui::Ui, colors: &ThemePalette, i18n: I18n) {
        section_frame(colors).show(ui, |ui| {
            ui.set_width(ui.available_width());
            if self.launch.prelaunch_visible {
                let text = RichText::new(i18n.launch_button())
                    .color(colors.text_primary)
                    .strong();
                if ui.add(primary_cta_button(text, colors, 180.0)).clicked() {
                    self.launch.click_launch();
                    self.trigger_action(UserAction::ClickLaunch);
                }
            }
            if self.launch.postlaunch_visible {
                ui.label(RichText::new(i18n.launching()).color(colors.text_muted));
                ui.add(egui::ProgressBar::new(self.launch.progress).show_percentage());
                if let AppState::Error(err) = &self.state {
                    ui.colored_label(colors.danger, i18n.launch_failed(err));
                }
            }
        });
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        self.sync_state();
        self.sync_notify_updates();
        let colors = self.colors();
        apply_theme(ctx, &colors);
        let i18n = self.i18n();

        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(colors.panel)
                    .stroke(Stroke::new(1.0, colors.border))
                    .inner_margin(Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new(i18n.heading()).color(colors.accent));
                    ui.allocate_ui_with_layout(
                        ui.available_size_before_wrap(),
                        Layout::right_to_left(Align::Center),
                        |ui| {
                            egui::ComboBox::from_id_salt("theme_combo")
                                .selected_text(i18n.theme_label(self.theme))
                                .show_ui(ui, |ui| {
                                    for theme in [Theme::Dark, Theme::Light] {
                                        ui.selectable_value(
                                            &mut self.theme,
                                            theme,
                                            i18n.theme_label(theme),
                                        );
                                    }
                                });
                            egui::ComboBox::from_id_salt("language_combo")
                                .selected_text(self.language.display_name())
                                .show_ui(ui, |ui| {
                                    for language in [Language::English, Language::Korean] {
                                        ui.selectable_value(
                                            &mut self.language,
                                            language,
                                            language.display_name(),
                                        );
                                    }
                                });
                            self.render_nav(ui, &colors, i18n);
                        },
                    );
                });
            });

        if self.launch.container_visible {
            egui::TopBottomPanel::bottom("launch_content")
                .frame(Frame::new().fill(colors.panel).inner_margin(Margin::same(16)))
                .show(ctx, |ui| self.render_launch(ui, &colors, i18n));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_notify(ui, &colors, i18n);
            });
        });

        if self.notify_loading || matches!(self.state, AppState::Launching { .. }) {
            ctx.request_repaint_after(BACKGROUND_REPAINT);
        }
    }
}
