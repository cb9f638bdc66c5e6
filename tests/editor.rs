use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use planmarker::config::Action;
use planmarker::draw::Annotation;
use planmarker::input::{Key, MouseButton, PaletteMode, ShortcutRegistry, Tool};
use planmarker::record::DataUri;
use planmarker::util::Point;
use planmarker::{Config, EditorHost, FileRecord, PlanEditor};
use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

#[derive(Default)]
struct Outcome {
    saved: Option<(String, Vec<Annotation>)>,
    closed: bool,
}

struct FormHost(Rc<RefCell<Outcome>>);

impl EditorHost for FormHost {
    fn on_save(&mut self, content: String, annotations: Vec<Annotation>) {
        self.0.borrow_mut().saved = Some((content, annotations));
    }

    fn on_close(&mut self) {
        self.0.borrow_mut().closed = true;
    }
}

fn png_record(width: u32, height: u32) -> FileRecord {
    let image = RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    FileRecord::new("plan.png", "image/png", &bytes)
}

fn open(
    file: FileRecord,
    mode: PaletteMode,
    registry: &ShortcutRegistry,
) -> (PlanEditor, Rc<RefCell<Outcome>>) {
    let outcome = Rc::new(RefCell::new(Outcome::default()));
    let editor = PlanEditor::open(
        file,
        mode,
        &Config::default(),
        registry,
        Box::new(FormHost(outcome.clone())),
    );
    (editor, outcome)
}

fn click(editor: &mut PlanEditor, x: f64, y: f64) {
    editor.pointer_down(MouseButton::Left, Point::new(x, y));
    editor.pointer_up(MouseButton::Left, Point::new(x, y));
}

fn drag(editor: &mut PlanEditor, from: (f64, f64), to: (f64, f64)) {
    editor.pointer_down(MouseButton::Left, Point::new(from.0, from.1));
    editor.pointer_move(Point::new(to.0, to.1));
    editor.pointer_up(MouseButton::Left, Point::new(to.0, to.1));
}

#[test]
fn place_socket_and_save() {
    let registry = ShortcutRegistry::new();
    let (mut editor, outcome) = open(png_record(400, 300), PaletteMode::Electrics, &registry);

    assert!(editor.select_tool(Tool::Socket));
    click(&mut editor, 100.0, 150.0);
    assert_eq!(
        editor.annotations(),
        &[Annotation::Socket { x: 100.0, y: 150.0 }]
    );

    editor.save();

    let outcome = outcome.borrow();
    let (content, annotations) = outcome.saved.as_ref().expect("save callback fired");
    assert!(content.starts_with("data:image/png;base64,"));
    assert!(content.len() > "data:image/png;base64,".len());
    assert_eq!(annotations.len(), 1);
    assert_eq!(
        serde_json::to_value(&annotations[0]).unwrap(),
        serde_json::json!({ "type": "socket", "x": 100.0, "y": 150.0 })
    );

    let composite = image::load_from_memory(&DataUri::parse(content).unwrap().bytes)
        .unwrap()
        .to_rgba8();
    assert_eq!(composite.dimensions(), (400, 300));
    let marker = composite.get_pixel(100, 141).0;
    assert!(marker[0] > 200 && marker[1] < 100, "marker not baked in: {marker:?}");
    assert!(!outcome.closed);
    assert_eq!(registry.active_scopes(), 0);
}

#[test]
fn saved_record_merges_back_into_file_list() {
    let registry = ShortcutRegistry::new();
    let mut record = png_record(120, 80);
    let (mut editor, outcome) = open(record.clone(), PaletteMode::Annotate, &registry);

    editor.select_tool(Tool::Frame);
    drag(&mut editor, (10.0, 10.0), (70.0, 50.0));
    editor.save();

    let (content, annotations) = outcome.borrow_mut().saved.take().unwrap();
    record.apply_edit(content, annotations);

    let reopened = FileRecord::from_json(&record.to_json().unwrap()).unwrap();
    assert_eq!(reopened.annotations.len(), 1);
    assert_eq!(reopened.name, "plan.png");
}

#[test]
fn existing_annotations_can_be_moved_and_undone() {
    let registry = ShortcutRegistry::new();
    let mut record = png_record(200, 200);
    record.annotations = vec![Annotation::Arrow {
        x: 10.0,
        y: 10.0,
        x2: 50.0,
        y2: 50.0,
        color: None,
    }];
    let (mut editor, _) = open(record, PaletteMode::Electrics, &registry);
    assert!(!editor.can_undo());

    editor.select_tool(Tool::Move);
    drag(&mut editor, (30.0, 30.0), (35.0, 35.0));
    assert_eq!(
        editor.annotations(),
        &[Annotation::Arrow {
            x: 15.0,
            y: 15.0,
            x2: 55.0,
            y2: 55.0,
            color: None,
        }]
    );

    editor.handle_action(Action::Undo);
    assert_eq!(editor.annotations()[0].anchor(), Point::new(10.0, 10.0));
    editor.handle_action(Action::Redo);
    assert_eq!(editor.annotations()[0].anchor(), Point::new(15.0, 15.0));
}

#[test]
fn history_keeps_three_steps() {
    let registry = ShortcutRegistry::new();
    let (mut editor, _) = open(png_record(100, 100), PaletteMode::Electrics, &registry);
    editor.select_tool(Tool::Switch);
    for i in 0..5 {
        click(&mut editor, 10.0 + i as f64 * 15.0, 20.0);
    }

    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(editor.annotations().len(), 2);
}

#[test]
fn close_discards_session_edits() {
    let registry = ShortcutRegistry::new();
    let record = png_record(100, 100);
    let (mut editor, outcome) = open(record.clone(), PaletteMode::Electrics, &registry);
    editor.select_tool(Tool::Tv);
    click(&mut editor, 50.0, 50.0);
    editor.close();

    assert!(outcome.borrow().closed);
    assert!(outcome.borrow().saved.is_none());
    assert!(record.annotations.is_empty());
}

#[test]
fn only_newest_session_receives_shortcuts() {
    let registry = ShortcutRegistry::new();
    let (mut first, _) = open(png_record(50, 50), PaletteMode::Electrics, &registry);
    first.select_tool(Tool::Socket);
    click(&mut first, 5.0, 5.0);

    let (second, _) = open(png_record(50, 50), PaletteMode::Electrics, &registry);
    assert_eq!(registry.active_scopes(), 2);

    first.key_press(Key::Ctrl);
    first.key_press(Key::Char('z'));
    first.key_release(Key::Ctrl);
    assert_eq!(first.annotations().len(), 1);

    second.close();
    first.key_press(Key::Ctrl);
    first.key_press(Key::Char('z'));
    first.key_release(Key::Ctrl);
    assert!(first.annotations().is_empty());
}

#[test]
fn jpeg_plans_are_saved_as_jpeg() {
    let image = RgbImage::from_pixel(80, 60, image::Rgb([200, 200, 200]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    let record = FileRecord::new("plan.jpg", "image/jpeg", &bytes);

    let registry = ShortcutRegistry::new();
    let (mut editor, outcome) = open(record, PaletteMode::Annotate, &registry);
    editor.select_tool(Tool::Line);
    drag(&mut editor, (0.0, 30.0), (80.0, 30.0));
    editor.save();

    let outcome = outcome.borrow();
    let (content, _) = outcome.saved.as_ref().unwrap();
    assert!(content.starts_with("data:image/jpeg;base64,"));
}

#[test]
fn undecodable_background_degrades_silently() {
    let registry = ShortcutRegistry::new();
    let record = FileRecord::new("plan.png", "image/png", &[0, 1, 2, 3]);
    let (mut editor, outcome) = open(record.clone(), PaletteMode::Electrics, &registry);

    assert!(editor.surface().is_none());
    editor.select_tool(Tool::Lan);
    click(&mut editor, 10.0, 10.0);
    editor.save();

    let outcome = outcome.borrow();
    let (content, annotations) = outcome.saved.as_ref().expect("save callback fired");
    assert_eq!(content, &record.content);
    assert_eq!(annotations, &vec![Annotation::Lan { x: 10.0, y: 10.0 }]);
    assert!(!outcome.closed);
}
