use crate::gui::app::EDITOR_PADDING;
use crate::gui::{Message, RephraseApp};
use iced::widget::{
    button, column, container, opaque, row, text, text_editor, Space, Stack,
};
use iced::{Alignment, Element, Font, Length, Padding};

pub fn view(app: &RephraseApp) -> Element<'_, Message> {
    let editor = text_editor(&app.content)
        .on_action(Message::Edit)
        .font(Font::MONOSPACE)
        .size(app.config.editor_font_size)
        .padding(EDITOR_PADDING)
        .wrapping(text::Wrapping::None)
        .height(Length::Fill);

    let mut layers = Stack::new()
        .push(editor)
        .width(Length::Fill)
        .height(Length::Fill);

    if let Some(control) = app.controller.floating_control() {
        let paraphrase_btn = button(text(control.label))
            .padding(8)
            .style(button::primary)
            .on_press_maybe(control.enabled.then_some(Message::ParaphrasePressed));

        // Overlay coordinates are relative to the editor's top-left corner
        layers = layers.push(container(paraphrase_btn).padding(Padding {
            top: control.position.y.max(0.0),
            right: 0.0,
            bottom: 0.0,
            left: control.position.x.max(0.0),
        }));
    }

    if let Some(notice) = app.controller.notice() {
        let card = container(
            column![
                text(&notice.message).size(18),
                button(text("OK"))
                    .padding([6, 24])
                    .on_press(Message::DismissNotice)
            ]
            .spacing(16)
            .align_x(Alignment::Center),
        )
        .padding(24)
        .style(container::rounded_box);

        layers = layers.push(opaque(
            container(card)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        ));
    }

    column![
        text("AI Text Editor").size(32),
        text("Select some text and press Paraphrase to rewrite it.")
            .size(16)
            .style(text::secondary),
        container(layers)
            .padding(4)
            .style(container::rounded_box)
            .height(Length::Fill),
        row![
            text(&app.status).style(text::secondary),
            Space::with_width(Length::Fill),
            text(format!(
                "{} characters",
                app.surface.document().len_chars()
            ))
            .style(text::secondary),
        ]
    ]
    .spacing(12)
    .padding(20)
    .into()
}
