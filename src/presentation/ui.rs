use crate::application::{text, App, AppMode, Field, Focus};
use crate::domain::{format_brl, format_quantity};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input(f, app, Field::Name, chunks[1]);
    render_input(f, app, Field::Quantity, chunks[2]);
    render_input(f, app, Field::Price, chunks[3]);
    render_submit(f, app, chunks[4]);
    render_items(f, app, chunks[5]);
    render_total(f, app, chunks[6]);
    render_status_bar(f, app, chunks[7]);

    match app.mode {
        AppMode::Alert => render_alert_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Normal => {}
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(text::TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => text::NAME_PLACEHOLDER,
        Field::Quantity => text::QUANTITY_PLACEHOLDER,
        Field::Price => text::PRICE_PLACEHOLDER,
    }
}

fn render_input(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let focused = app.mode == AppMode::Normal && app.focus == Focus::Input(field);
    let value = app.form.field(field);

    let (content, style) = if value.is_empty() {
        (placeholder(field), Style::default().fg(Color::DarkGray))
    } else {
        (value, Style::default())
    };
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let input = Paragraph::new(content).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(placeholder(field)),
    );
    f.render_widget(input, area);

    if focused {
        let x = area.x + 1 + app.form.cursor_position.min(area.width.saturating_sub(3) as usize) as u16;
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_submit(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.is_editing() {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::White).bg(Color::Blue)
    };
    let button = Paragraph::new(format!("[ Enter: {} ]", app.submit_label()))
        .alignment(Alignment::Center)
        .style(style);
    f.render_widget(button, area);
}

fn render_items(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Produtos");

    if app.list.is_empty() {
        let empty = Paragraph::new(text::EMPTY_LIST)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Produto"),
        Cell::from("Qtd x Valor"),
        Cell::from("Subtotal"),
    ])
    .style(Style::default().fg(Color::Yellow));

    let rows = app.list.items().iter().map(|item| {
        let editing = app.form.editing == Some(item.id);
        let style = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(item.name.clone()),
            Cell::from(format!("{} x {}", format_quantity(item.quantity), format_brl(item.unit_price))),
            Cell::from(format_brl(item.subtotal())),
        ])
        .style(style)
    });

    let highlight = if app.focus == Focus::List {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let table = Table::new(
        rows,
        [Constraint::Percentage(50), Constraint::Percentage(30), Constraint::Percentage(20)],
    )
    .header(header)
    .block(block)
    .row_highlight_style(highlight)
    .column_spacing(1);

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_total(f: &mut Frame, app: &App, area: Rect) {
    let total = Paragraph::new(format!("{}: {}", text::TOTAL_LABEL, format_brl(app.list.total())))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(total, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::Alert => "Enter/Esc: ok".to_string(),
        AppMode::Normal => match (&app.status_message, app.focus) {
            (Some(status), _) => status.clone(),
            (None, Focus::List) => format!(
                "e: editar | d: excluir | a: adicionar | Ctrl+E: {} | ?: ajuda | q: sair",
                text::EXPORT_BUTTON
            ),
            (None, Focus::Input(_)) => format!(
                "Tab: próximo campo | Enter: {} | Esc: {} | Ctrl+E: {}",
                app.submit_label(),
                if app.is_editing() { "cancelar" } else { "lista" },
                text::EXPORT_BUTTON
            ),
        },
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal if app.is_editing() => Style::default().fg(Color::Yellow),
            AppMode::Normal => Style::default(),
            AppMode::Alert => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    }
}

fn render_alert_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(f.area(), 60, 5);
    f.render_widget(Clear, popup_area);

    let message = app.alert_message.as_deref().unwrap_or_default();
    let alert = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Atenção")
                .style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(alert, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Ajuda (linha {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"LISTA DE COMPRAS

=== FORMULÁRIO ===
Tab / Shift+Tab     Próximo / campo anterior
↑ ↓                 Move entre os campos
Enter               Adicionar Produto / Salvar Alterações
Esc                 Cancela a edição, ou volta para a lista

O valor aceita vírgula como separador decimal: 3,50
Quantidade aceita números decimais: 1,5

=== LISTA ===
↑ ↓ ou j/k          Seleciona um produto
Enter ou e          Edita o produto selecionado
Delete ou d         Exclui o produto selecionado (sem confirmação)
a                   Volta para o campo de nome

=== EXPORTAÇÃO ===
Ctrl+E              Exportar para Excel (produtos.xlsx, planilha "Produtos")
                    Em uma sessão gráfica a planilha é aberta no aplicativo
                    padrão; caso contrário é salva no diretório de cache e o
                    caminho é copiado para a área de transferência.

=== GERAL ===
? ou F1             Mostra esta ajuda
q                   Sai (com a lista selecionada)
Ctrl+C              Sai de qualquer lugar

A lista existe apenas enquanto o programa está aberto."#;
