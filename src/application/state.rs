//! Application state management for the shopping list screen.
//!
//! [`App`] owns the item list, the input form and the export action. All
//! mutations happen synchronously from the key handler.

use super::list::ShoppingList;
use super::text;
use crate::domain::{
    format_price_input, format_quantity, validate_item, ExportError, ItemId, SpreadsheetExporter,
    ValidationError, XlsxExporter,
};
use crate::infrastructure::{Config, ExportOutcome, FileDelivery};

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Regular interaction with the form and the list
    Normal,
    /// A blocking message is shown and must be dismissed
    Alert,
    /// Help screen is displayed
    Help,
}

/// One of the three form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Quantity,
    Price,
}

/// Where keyboard input currently goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(Field),
    List,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::Input(Field::Name),
        Focus::Input(Field::Quantity),
        Focus::Input(Field::Price),
        Focus::List,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Text of the add/edit form and the editing marker.
///
/// `cursor_position` counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub quantity: String,
    pub price: String,
    pub editing: Option<ItemId>,
    pub cursor_position: usize,
}

impl FormState {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Quantity => &self.quantity,
            Field::Price => &self.price,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Quantity => &mut self.quantity,
            Field::Price => &mut self.price,
        }
    }

    fn byte_index(text: &str, char_index: usize) -> usize {
        text.char_indices().nth(char_index).map(|(i, _)| i).unwrap_or(text.len())
    }

    pub fn field_len(&self, field: Field) -> usize {
        self.field(field).chars().count()
    }

    pub fn insert_char(&mut self, field: Field, c: char) {
        if field == Field::Price && !(c.is_ascii_digit() || c == '.' || c == ',') {
            return;
        }
        let position = self.cursor_position;
        let text = self.field_mut(field);
        let index = Self::byte_index(text, position);
        text.insert(index, c);
        self.cursor_position += 1;
    }

    pub fn backspace(&mut self, field: Field) {
        if self.cursor_position == 0 {
            return;
        }
        let position = self.cursor_position - 1;
        let text = self.field_mut(field);
        let index = Self::byte_index(text, position);
        if index < text.len() {
            text.remove(index);
            self.cursor_position = position;
        }
    }

    pub fn delete(&mut self, field: Field) {
        let position = self.cursor_position;
        let text = self.field_mut(field);
        let index = Self::byte_index(text, position);
        if index < text.len() {
            text.remove(index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_right(&mut self, field: Field) {
        if self.cursor_position < self.field_len(field) {
            self.cursor_position += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_end(&mut self, field: Field) {
        self.cursor_position = self.field_len(field);
    }

    /// Empties the three inputs. The editing marker is left alone.
    pub fn clear_fields(&mut self) {
        self.name.clear();
        self.quantity.clear();
        self.price.clear();
        self.cursor_position = 0;
    }
}

/// Main application state: the shopping list, the form and the export wiring.
///
/// # Examples
///
/// ```
/// use lista_compras::application::App;
/// use lista_compras::infrastructure::{Config, ShareDelivery, ClipboardShare};
///
/// let delivery = ShareDelivery::new(std::env::temp_dir(), ClipboardShare);
/// let app = App::new(&Config::default(), Box::new(delivery));
/// assert!(app.list.is_empty());
/// assert!(!app.is_editing());
/// ```
pub struct App {
    /// Items and running total
    pub list: ShoppingList,
    /// Add/edit form
    pub form: FormState,
    /// Which input or the list receives keys
    pub focus: Focus,
    /// Current application mode
    pub mode: AppMode,
    /// Highlighted row in the list
    pub selected: usize,
    /// Message shown while in alert mode
    pub alert_message: Option<String>,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    exporter: Box<dyn SpreadsheetExporter>,
    delivery: Box<dyn FileDelivery>,
    export_file_name: String,
}

impl App {
    pub fn new(config: &Config, delivery: Box<dyn FileDelivery>) -> Self {
        Self::with_exporter(
            config,
            Box::new(XlsxExporter::new(config.sheet_name.clone())),
            delivery,
        )
    }

    pub fn with_exporter(
        config: &Config,
        exporter: Box<dyn SpreadsheetExporter>,
        delivery: Box<dyn FileDelivery>,
    ) -> Self {
        Self {
            list: ShoppingList::default(),
            form: FormState::default(),
            focus: Focus::Input(Field::Name),
            mode: AppMode::Normal,
            selected: 0,
            alert_message: None,
            status_message: None,
            help_scroll: 0,
            exporter,
            delivery,
            export_file_name: config.export_file_name.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.form.editing.is_some()
    }

    /// Label of the submit action for the current mode.
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { text::SAVE_BUTTON } else { text::ADD_BUTTON }
    }

    pub fn delivery_name(&self) -> &'static str {
        self.delivery.describe()
    }

    /// Adds a new item or saves the one being edited from the form contents.
    ///
    /// On invalid input a blocking alert is raised and nothing changes, the
    /// typed text included. On success the form is cleared and focus leaves the
    /// inputs.
    pub fn submit(&mut self) -> Result<ItemId, ValidationError> {
        let draft = match validate_item(&self.form.name, &self.form.quantity, &self.form.price) {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(error = %err, "rejected form input");
                self.show_alert(text::INVALID_INPUT_ALERT);
                return Err(err);
            }
        };

        let editing = self.form.editing;
        let transition = editing
            .and_then(|id| self.list.with_replaced(id, draft.clone()).map(|r| r.map(|list| (list, id))))
            .unwrap_or_else(|| self.list.with_added(draft));

        let (list, id) = match transition {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(error = %err, "rejected item");
                self.show_alert(text::INVALID_INPUT_ALERT);
                return Err(err);
            }
        };
        if editing == Some(id) {
            tracing::debug!(%id, "item updated");
        } else {
            tracing::debug!(%id, "item added");
        }
        self.list = list;

        self.form.editing = None;
        self.form.clear_fields();
        self.focus = Focus::List;
        self.selected = self.list.position(id).unwrap_or(0);
        self.status_message = None;
        Ok(id)
    }

    /// Loads an item into the form and marks it as being edited.
    pub fn start_edit(&mut self, id: ItemId) -> bool {
        let Some(item) = self.list.get(id) else {
            return false;
        };

        self.form.name = item.name.clone();
        self.form.quantity = format_quantity(item.quantity);
        self.form.price = format_price_input(item.unit_price);
        self.form.editing = Some(id);
        self.focus = Focus::Input(Field::Name);
        self.form.move_end(Field::Name);
        self.status_message = None;
        true
    }

    pub fn edit_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.start_edit(id),
            None => false,
        }
    }

    /// Leaves edit mode, discarding the typed changes.
    pub fn cancel_edit(&mut self) {
        if self.form.editing.take().is_some() {
            self.form.clear_fields();
        }
    }

    /// Removes an item. Unknown ids are ignored.
    pub fn delete(&mut self, id: ItemId) {
        if self.list.get(id).is_none() {
            return;
        }

        self.list = self.list.without(id);
        tracing::debug!(%id, "item deleted");

        if self.form.editing == Some(id) {
            self.form.editing = None;
        }
        if self.selected >= self.list.len() {
            self.selected = self.list.len().saturating_sub(1);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.delete(id);
        }
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.list.items().get(self.selected).map(|item| item.id)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.list.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn focus_input(&mut self, field: Field) {
        self.focus = Focus::Input(field);
        self.form.move_end(field);
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let next = if forward { self.focus.next() } else { self.focus.previous() };
        match next {
            Focus::Input(field) => self.focus_input(field),
            Focus::List => self.focus = Focus::List,
        }
    }

    pub fn show_alert(&mut self, message: &str) {
        self.alert_message = Some(message.to_string());
        self.mode = AppMode::Alert;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert_message = None;
        self.mode = AppMode::Normal;
    }

    /// Serializes the current list and hands it to the configured delivery.
    ///
    /// Failures never interrupt the screen: they are logged, summarized in the
    /// status bar and returned.
    pub fn export(&mut self) -> Result<ExportOutcome, ExportError> {
        let records = self.list.records();
        tracing::info!(items = records.len(), delivery = self.delivery.describe(), "exporting list");

        let result = self
            .exporter
            .export(&records)
            .map_err(ExportError::from)
            .and_then(|bytes| self.delivery.deliver(&self.export_file_name, &bytes));

        self.status_message = Some(match &result {
            Ok(ExportOutcome::Opened(path)) => {
                tracing::info!(path = %path.display(), "workbook opened");
                format!("Planilha aberta: {}", path.display())
            }
            Ok(ExportOutcome::Shared(path)) => {
                tracing::info!(path = %path.display(), "workbook shared");
                format!(
                    "Planilha salva em {} (caminho copiado para a área de transferência)",
                    path.display()
                )
            }
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                match (err, err.written_path()) {
                    (ExportError::Open { .. }, Some(path)) => {
                        format!("Planilha salva em {}, mas não foi possível abrir", path.display())
                    }
                    (_, Some(path)) => {
                        format!("Planilha salva em {}, mas não foi possível compartilhar", path.display())
                    }
                    (_, None) => "Erro ao exportar planilha".to_string(),
                }
            }
        });

        result
    }
}
