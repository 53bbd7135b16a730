//! Plain-text rendering of the users page.

use std::fmt;

use user_registry_core::Field;

use crate::api::UsersApi;
use crate::form::FormMode;
use crate::messages;
use crate::page::UsersPage;

const ADD_LABEL: &str = "Adicionar usuário";
const SAVE_LABEL: &str = "Salvar alterações";
const CANCEL_LABEL: &str = "Cancelar edição";
const EMPTY_LIST: &str = "(nenhum usuário cadastrado)";

/// Display adapter for a [`UsersPage`].
pub struct PageView<'a, A> {
    page: &'a UsersPage<A>,
}

impl<'a, A: UsersApi> PageView<'a, A> {
    /// Wrap `page` for display.
    #[must_use]
    pub const fn new(page: &'a UsersPage<A>) -> Self {
        Self { page }
    }
}

impl<A: UsersApi> fmt::Display for PageView<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.page.form();

        writeln!(f, "{}", messages::TITLE)?;
        writeln!(f, "{}", "=".repeat(messages::TITLE.chars().count()))?;

        if let Some(error) = self.page.error() {
            writeln!(f)?;
            writeln!(f, "! {error}")?;
        }

        writeln!(f)?;
        for field in Field::ALL {
            writeln!(f, "  {:<9} [{}]", field.as_str(), form.get(field))?;
        }

        writeln!(f)?;
        match form.mode() {
            FormMode::Create => writeln!(f, "  <{ADD_LABEL}>")?,
            FormMode::Edit(id) => {
                writeln!(f, "  Editando #{id}")?;
                writeln!(f, "  <{SAVE_LABEL}>  <{CANCEL_LABEL}>")?;
            }
        }

        writeln!(f)?;
        if self.page.users().is_empty() {
            writeln!(f, "{EMPTY_LIST}")?;
        }
        for user in self.page.users() {
            let marker = if form.mode() == FormMode::Edit(user.id) {
                '*'
            } else {
                ' '
            };
            writeln!(
                f,
                "{marker} #{:<4} {}  <{}>",
                user.id.as_i32(),
                user.nome,
                user.email
            )?;
        }

        Ok(())
    }
}

/// Render the whole page as text.
#[must_use]
pub fn render_page<A: UsersApi>(page: &UsersPage<A>) -> String {
    PageView::new(page).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use user_registry_core::UserId;

    use crate::page::tests::FakeApi;

    use super::*;

    #[tokio::test]
    async fn test_render_create_mode() {
        let api = FakeApi::with_users(&[("Ana Souza", "ana@example.com", "52998224725")]);
        let mut page = UsersPage::new(api);
        page.load().await;
        page.set(Field::Nome, "Carla");

        let text = render_page(&page);

        assert!(text.starts_with("Cadastro de Usuários\n"));
        assert!(text.contains("  nome      [Carla]"));
        assert!(text.contains("  cpf       []"));
        assert!(text.contains(ADD_LABEL));
        assert!(!text.contains(CANCEL_LABEL));
        assert!(text.contains("#1    Ana Souza  <ana@example.com>"));
    }

    #[tokio::test]
    async fn test_render_edit_mode_with_banner() {
        let api = FakeApi::with_users(&[
            ("Ana Souza", "ana@example.com", "52998224725"),
            ("Bruno Lima", "bruno@example.com", "11144477735"),
        ]);
        let mut page = UsersPage::new(api);
        page.load().await;
        page.edit(UserId::new(2));
        page.set(Field::Email, "");
        page.submit().await;

        let text = render_page(&page);

        assert!(text.contains("! O campo \"email\" é obrigatório."));
        assert!(text.contains(SAVE_LABEL));
        assert!(text.contains(CANCEL_LABEL));
        assert!(!text.contains(ADD_LABEL));
        assert!(text.contains("* #2    Bruno Lima"));
        assert!(text.contains("  #1    Ana Souza"));
    }

    #[tokio::test]
    async fn test_render_empty_list() {
        let page = UsersPage::new(FakeApi::default());
        let text = render_page(&page);
        assert!(text.contains(EMPTY_LIST));
        assert!(!text.contains("! "));
    }
}
