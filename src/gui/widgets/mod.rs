use iced::{
    Alignment::Center,
    Color, Element, Length, Theme, border,
    widget::{
        button, column, container,
        container::{Style, bordered_box},
        progress_bar, row, scrollable, text,
    },
};

use crate::{
    gui::{AppState, Message},
    layout::{self, BRAND_MARK, BRAND_NAME, CONTACT_LINES, ContactKind, NAV_LINKS, TAGLINE},
    pipeline::StepStatus,
    presentation::{BadgeVariant, ConfidenceBadge, ConfidenceLevel, ShareBar, StepView},
    routes::Route,
    settings,
};

const AMBER: Color = Color {
    r: 0.96,
    g: 0.62,
    b: 0.04,
    a: 1.0,
};

fn tint(color: Color) -> Color {
    Color { a: 0.12, ..color }
}

fn step_style(status: StepStatus) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let palette = theme.extended_palette();
        let style = bordered_box(theme).border(border::rounded(8).width(1));
        match status {
            StepStatus::Completed => style
                .background(tint(palette.success.base.color))
                .border(border::rounded(8).width(1).color(palette.success.base.color)),
            StepStatus::Processing => style
                .background(tint(palette.primary.base.color))
                .border(border::rounded(8).width(1).color(palette.primary.base.color)),
            StepStatus::Error => style
                .background(tint(palette.danger.base.color))
                .border(border::rounded(8).width(1).color(palette.danger.base.color)),
            StepStatus::Pending => style.background(palette.background.base.color),
        }
    }
}

fn badge_style(variant: BadgeVariant) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let palette = theme.extended_palette();
        let pair = match variant {
            BadgeVariant::Default => palette.primary.base,
            BadgeVariant::Secondary => palette.secondary.base,
            BadgeVariant::Destructive => palette.danger.base,
            BadgeVariant::Outline => {
                return Style::default()
                    .color(palette.background.base.text)
                    .border(border::rounded(10).width(1).color(palette.background.strong.color));
            }
        };
        Style::default()
            .background(pair.color)
            .color(pair.text)
            .border(border::rounded(10))
    }
}

fn confidence_style(level: ConfidenceLevel) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let palette = theme.extended_palette();
        let (background, foreground) = match level {
            ConfidenceLevel::High => (palette.primary.base.color, palette.primary.base.text),
            ConfidenceLevel::Medium => (AMBER, Color::BLACK),
            ConfidenceLevel::Low => (palette.danger.base.color, palette.danger.base.text),
        };
        Style::default()
            .background(background)
            .color(foreground)
            .border(border::rounded(10))
    }
}

/// A titled panel, the building block of the page
pub fn card<'a, M: 'a>(
    title: &'static str,
    description: &'static str,
    content: impl Into<Element<'a, M>>,
) -> Element<'a, M> {
    container(
        column![
            column![text(title).size(20), text(description).size(13)].spacing(4),
            content.into(),
        ]
        .spacing(20),
    )
    .padding(24)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

pub fn step_row<'a, M: 'a>(step: &StepView) -> Element<'a, M> {
    container(
        row![
            text(step.icon.glyph()).size(20),
            column![text(step.title), text(step.description).size(12)]
                .spacing(2)
                .width(Length::Fill),
            container(text(step.status.as_str()).size(12))
                .padding([2, 8])
                .style(badge_style(step.badge)),
        ]
        .spacing(16)
        .align_y(Center),
    )
    .padding(16)
    .width(Length::Fill)
    .style(step_style(step.status))
    .into()
}

pub fn confidence_badge<'a, M: 'a>(badge: &ConfidenceBadge) -> Element<'a, M> {
    container(text(badge.text.clone()).size(12))
        .padding([2, 8])
        .style(confidence_style(badge.level))
        .into()
}

pub fn info_badge<'a, M: 'a>(value: &str) -> Element<'a, M> {
    container(text(value.to_string()).size(12))
        .padding([2, 8])
        .style(badge_style(BadgeVariant::Secondary))
        .into()
}

pub fn share_bar<'a, M: 'a>(bar: &ShareBar) -> Element<'a, M> {
    column![
        row![text(bar.label).width(Length::Fill), text(bar.text())],
        progress_bar(0.0..=100.0, bar.percent as f32),
    ]
    .spacing(4)
    .into()
}

fn contact_glyph(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Mail => "✉",
        ContactKind::Phone => "☎",
        ContactKind::Address => "⌂",
    }
}

fn navbar(state: &AppState) -> Element<'_, Message> {
    let theme_label = match state.theme.theme() {
        settings::Theme::Light => "☾ Dark",
        settings::Theme::Dark => "☀ Light",
    };
    let menu_label = if state.shell.is_mobile_menu_open() { "✕" } else { "☰" };

    let links = NAV_LINKS.iter().fold(row![].spacing(4), |r, link| {
        let style = if Route::resolve(link.path) == Some(state.route) {
            button::primary
        } else {
            button::text
        };
        r.push(button(text(link.label)).style(style).on_press(Message::Navigate(link.path)))
    });

    let bar = row![
        container(text(BRAND_MARK).size(14))
            .padding(8)
            .style(badge_style(BadgeVariant::Default)),
        text(BRAND_NAME).size(20).width(Length::Fill),
        links,
        button(text(theme_label)).style(button::secondary).on_press(Message::ToggleTheme),
        button(text(menu_label)).style(button::text).on_press(Message::ToggleMenu),
    ]
    .spacing(12)
    .align_y(Center);

    let mut nav = column![bar].spacing(8);
    if state.shell.is_mobile_menu_open() {
        nav = nav.push(NAV_LINKS.iter().fold(column![].spacing(4), |col, link| {
            col.push(
                button(text(link.label))
                    .style(button::text)
                    .width(Length::Fill)
                    .on_press(Message::Navigate(link.path)),
            )
        }));
    }

    container(nav)
        .padding([12, 24])
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn footer<'a>() -> Element<'a, Message> {
    let contacts = CONTACT_LINES.iter().fold(column![].spacing(4), |col, line| {
        col.push(row![text(contact_glyph(line.kind)), text(line.text).size(13)].spacing(8))
    });

    container(
        column![
            row![
                column![text(BRAND_NAME).size(18), text(TAGLINE).size(13)]
                    .spacing(8)
                    .width(Length::Fill),
                contacts,
            ]
            .spacing(32),
            text(layout::copyright_line(layout::current_year())).size(12),
        ]
        .spacing(24)
        .align_x(Center),
    )
    .padding(24)
    .width(Length::Fill)
    .style(container::rounded_box)
    .into()
}

/// Navbar on top, the screen and the footer scrolling underneath
pub fn layout<'a>(state: &'a AppState, content: Element<'a, Message>) -> Element<'a, Message> {
    column![
        navbar(state),
        scrollable(column![content, footer()].width(Length::Fill)).height(Length::Fill),
    ]
    .into()
}
