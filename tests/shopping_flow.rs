use calamine::{open_workbook, Data, Reader, Xlsx};
use crossterm::event::{KeyCode, KeyModifiers};
use lista_compras::application::{App, AppMode, Field, Focus};
use lista_compras::domain::format_brl;
use lista_compras::infrastructure::{Config, ExportOutcome, ShareDelivery, ShareSheet};
use lista_compras::presentation::InputHandler;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

struct AcceptingShare;

impl ShareSheet for AcceptingShare {
    fn share(&mut self, _path: &Path) -> Result<(), String> {
        Ok(())
    }
}

fn app_in(dir: &Path) -> App {
    let config = Config { export_dir: Some(dir.to_path_buf()), ..Config::default() };
    let delivery = ShareDelivery::new(config.export_dir(), AcceptingShare);
    App::new(&config, Box::new(delivery))
}

fn press(app: &mut App, key: KeyCode) {
    InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn add_item(app: &mut App, name: &str, quantity: &str, price: &str) {
    app.focus_input(Field::Name);
    type_text(app, name);
    press(app, KeyCode::Tab);
    type_text(app, quantity);
    press(app, KeyCode::Tab);
    type_text(app, price);
    press(app, KeyCode::Enter);
}

fn assert_total(app: &App, expected: &str) {
    assert_eq!(app.list.total(), Decimal::from_str(expected).unwrap());
    assert_eq!(app.list.total(), app.list.recomputed_total());
}

#[test]
fn test_milk_and_bread_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());

    add_item(&mut app, "Milk", "2", "3,50");
    assert_total(&app, "7.00");
    assert_eq!(format_brl(app.list.total()), "R$ 7,00");

    add_item(&mut app, "Bread", "1", "5,00");
    assert_total(&app, "12.00");

    let milk_id = app.list.items()[0].id;
    app.selected = 0;
    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.form.quantity, "2");
    assert_eq!(app.form.price, "3,50");

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "3");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.list.len(), 2);
    assert_eq!(app.list.items()[0].id, milk_id);
    assert_total(&app, "15.50");

    assert_eq!(app.focus, Focus::List);
    app.selected = 1;
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.list.len(), 1);
    assert_total(&app, "10.50");
    assert_eq!(format_brl(app.list.total()), "R$ 10,50");
}

#[test]
fn test_rejected_input_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    add_item(&mut app, "Milk", "2", "3,50");
    press(&mut app, KeyCode::Esc);

    add_item(&mut app, "", "2", "3,50");
    assert_eq!(app.list.len(), 1);
    assert_total(&app, "7");
    press(&mut app, KeyCode::Enter);

    app.form.clear_fields();
    add_item(&mut app, "Eggs", "abc", "1,00");
    assert_eq!(app.list.len(), 1);
    assert_total(&app, "7");
}

#[test]
fn test_export_empty_list_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());

    let outcome = app.export().unwrap();
    let expected = dir.path().join("produtos.xlsx");
    assert_eq!(outcome, ExportOutcome::Shared(expected.clone()));

    let mut workbook: Xlsx<_> = open_workbook(&expected).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Produtos"]);
    let range = workbook.worksheet_range("Produtos").unwrap();
    assert_eq!(range.height(), 1);
}

#[test]
fn test_export_via_shortcut_after_adding() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    add_item(&mut app, "Milk", "2", "3,50");

    InputHandler::handle_key_event(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);

    assert!(app.status_message.unwrap().contains("produtos.xlsx"));

    let mut workbook: Xlsx<_> = open_workbook(dir.path().join("produtos.xlsx")).unwrap();
    let range = workbook.worksheet_range("Produtos").unwrap();
    let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Data::String("nome".to_string()));
    assert_eq!(rows[1], vec![Data::String("Milk".to_string()), Data::Float(2.0), Data::Float(3.5)]);
}

#[test]
fn test_overflowing_total_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_in(dir.path());
    let max = "79228162514264337593543950335";

    add_item(&mut app, "Gold", "1", max);
    assert_eq!(app.list.len(), 1);

    add_item(&mut app, "Gold", "1", max);
    assert_eq!(app.mode, AppMode::Alert);
    assert_eq!(app.list.len(), 1);
    assert_total(&app, max);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, AppMode::Normal);
}
