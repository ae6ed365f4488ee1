// Drives the toolkit without any platform backend: builds a small UI,
// simulates input events, and prints the resulting state.
use pixelui::*;

use std::cell::RefCell;
use std::rc::Rc;

fn main() {
    let mut window = PlatformWindow::new("pixelui headless demo", dim(320, 240), Box::new(BevelTheme::new()), Rc::new(NullFont::new()));

    let clicks = Rc::new(RefCell::new(0u32));
    let mut button = Button::new("Add");
    {
        let clicks = clicks.clone();
        button.set_on_click(move || *clicks.borrow_mut() += 1);
    }
    let button = WidgetHandle::new(button);

    let checkbox = WidgetHandle::new(Checkbox::new("Announce"));
    let field = WidgetHandle::new(TextField::new("type here"));

    let mut list = ListView::new();
    list.set_adapter(Rc::new(TextAdapter::new((1..=50).map(|i| format!("row {i}")))));
    list.set_on_item_selected(|index, reason| println!("selected row {index} via {reason:?}"));
    let list = WidgetHandle::new(list);

    let mut root = Panel::new(dim(320, 240), BevelTheme::FACE);
    let mut layout = VerticalLayout::new();
    layout.set_margin(Spacing::uniform(8));
    layout.set_padding(Spacing { top: 2, bottom: 2, start: 0, end: 0 });
    layout.add_widget(&button);
    layout.add_widget(&checkbox);
    layout.add_widget(&field);
    layout.add_widget(&list);
    root.core_mut().set_layout(Box::new(layout));

    window.add_widget(button.clone());
    window.add_widget(checkbox.clone());
    window.add_widget(field.clone());
    window.add_widget(list.clone());
    window.set_main_widget(WidgetHandle::new(root));

    // Click the button: press and release inside its box.
    let r = button.rect();
    window.on_mouse(&EventMouse::moved(r.x + 2, r.y + 2, false));
    window.on_mouse(&EventMouse::press(MouseButton::LEFT, r.x + 2, r.y + 2));
    window.on_mouse(&EventMouse::release(MouseButton::LEFT, r.x + 2, r.y + 2));

    // Abort a second click by releasing outside.
    window.on_mouse(&EventMouse::press(MouseButton::LEFT, r.x + 2, r.y + 2));
    window.on_mouse(&EventMouse::release(MouseButton::LEFT, 0, 239));

    // Tab focus onto the list and navigate it.
    for _ in 0..4 {
        window.on_keyboard(&EventKeyboard::down(Key::Tab));
    }
    window.on_keyboard(&EventKeyboard::down(Key::Down));
    window.on_keyboard(&EventKeyboard::down(Key::Down));
    window.on_keyboard(&EventKeyboard::down(Key::Return));

    window.draw();

    println!("button clicks: {} (one completed, one aborted)", clicks.borrow());
    println!("focused widget present: {}", window.focused().is_some());
    let size = window.size();
    println!("composited frame: {}x{} pixels", size.width, size.height);
}
