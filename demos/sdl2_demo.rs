// Interactive demo on the SDL2 backend. Run with:
//   cargo run --example sdl2-demo --features sdl2-backend
use pixelui::*;

use std::rc::Rc;

fn main() -> Result<(), Error> {
    let font: Rc<dyn FontProvider> = match FontdueFont::from_file("assets/DejaVuSans.ttf", 14.0) {
        Ok(font) => Rc::new(font),
        Err(e) => Rc::new(NullFont::degraded(&e)),
    };
    let mut window = PlatformWindow::new("pixelui demo", dim(480, 360), Box::new(BevelTheme::new()), font);

    let mut counter_button = Button::new("Click me (hold to repeat)");
    counter_button.set_autorepeat(true);
    counter_button.set_on_click(|| println!("click"));
    let counter_button = WidgetHandle::new(counter_button);

    let mut checkbox = Checkbox::new("Log toggles");
    checkbox.set_on_change(|checked| println!("checked: {checked}"));
    let checkbox = WidgetHandle::new(checkbox);

    let mut field = TextField::new("");
    field.set_on_change(|text| println!("text: {text}"));
    let field = WidgetHandle::new(field);

    let mut combo = Combobox::new(["first", "second", "third"]);
    combo.set_on_selected(|index| println!("picked {index}"));
    let combo = WidgetHandle::new(combo);

    let mut list = ListView::new();
    list.set_adapter(Rc::new(TextAdapter::new((1..=200).map(|i| format!("entry {i}")))));
    list.set_on_item_selected(|index, reason| println!("row {index} ({reason:?})"));
    let list = WidgetHandle::new(list);

    let mut root = Panel::new(dim(480, 360), BevelTheme::FACE);
    let mut layout = VerticalLayout::new();
    layout.set_margin(Spacing::uniform(10));
    layout.set_padding(Spacing { top: 3, bottom: 3, start: 0, end: 0 });
    layout.add_widget(&counter_button);
    layout.add_widget(&checkbox);
    layout.add_widget(&field);
    layout.add_widget(&combo);
    layout.add_widget(&list);
    root.core_mut().set_layout(Box::new(layout));

    window.add_widget(counter_button);
    window.add_widget(checkbox);
    window.add_widget(field);
    window.add_widget(combo);
    window.add_widget(list);
    window.set_main_widget(WidgetHandle::new(root));

    Sdl2Backend::new().run(&mut window)
}
