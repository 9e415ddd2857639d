use eframe::egui;

/// Form đăng nhập; trả về true khi submit với đủ hai ô.
pub fn render(ui: &mut egui::Ui, user_name: &mut String, password: &mut String) -> bool {
    let mut submit = false;

    ui.label("User name");
    ui.text_edit_singleline(user_name);

    ui.label("Password");
    let response = ui.add(egui::TextEdit::singleline(password).password(true));
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        submit = true;
    }

    if ui.button("Submit").clicked() {
        submit = true;
    }

    submit && !user_name.is_empty() && !password.is_empty()
}
