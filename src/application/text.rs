//! User-facing strings (pt-BR).

pub const TITLE: &str = "Lista de Compras";
pub const NAME_PLACEHOLDER: &str = "Nome do produto";
pub const QUANTITY_PLACEHOLDER: &str = "Quantidade";
pub const PRICE_PLACEHOLDER: &str = "Valor";
pub const ADD_BUTTON: &str = "Adicionar Produto";
pub const SAVE_BUTTON: &str = "Salvar Alterações";
pub const EXPORT_BUTTON: &str = "Exportar para Excel";
pub const TOTAL_LABEL: &str = "Total";
pub const INVALID_INPUT_ALERT: &str = "Por favor, preencha todos os campos corretamente.";
pub const EMPTY_LIST: &str = "Nenhum produto na lista";
