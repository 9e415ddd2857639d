use eframe::egui;

/// Ô nhập + nút gửi. Trả về nội dung khi submit, kể cả khi rỗng — validation
/// là việc của dispatcher. Không tự dọn ô nhập: app chỉ dọn sau khi gửi
/// thành công.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> Option<String> {
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.text_edit_singleline(input_text);
        if ui.button("Send").clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    send.then(|| input_text.clone())
}
