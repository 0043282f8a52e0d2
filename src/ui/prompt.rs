//! Modal prompt window

use egui::{Align2, Id, Key};

use super::ERROR;
use crate::editor::Editor;

pub(super) fn draw_prompt(ctx: &egui::Context, editor: &mut Editor) {
    let Some(prompt) = editor.prompt_mut() else {
        return;
    };

    let mut submit = false;
    let mut cancel = false;
    egui::Window::new(prompt.title())
        .id(Id::new("editor_prompt"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let secret = prompt.is_secret();
            let response = ui.add(
                egui::TextEdit::singleline(&mut prompt.input)
                    .password(secret)
                    .desired_width(260.0),
            );
            response.request_focus();

            if let Some(error) = &prompt.error {
                ui.colored_label(ERROR, error);
            }

            ui.horizontal(|ui| {
                submit |= ui.button("OK").clicked();
                cancel |= ui.button("Cancel").clicked();
            });

            ui.input(|i| {
                submit |= i.key_pressed(Key::Enter);
                cancel |= i.key_pressed(Key::Escape);
            });
        });

    if submit {
        editor.submit_prompt();
    } else if cancel {
        editor.cancel_prompt();
    }
}
