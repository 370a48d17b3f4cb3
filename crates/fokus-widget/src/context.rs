//! Timer context switcher: focus, short break and long break.

use fokus_dom::{Document, Listener, NodeId};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{WidgetError, required};

/// Class every context button carries.
pub const CARD_BUTTON_CLASS: &str = "app__card-button";
/// Class marking the button of the current context.
pub const ACTIVE_CLASS: &str = "active";
/// Attribute set on the root element to the current context.
pub const CONTEXT_ATTRIBUTE: &str = "data-contexto";

const BANNER: &str = ".app__image";
const TITLE: &str = ".app__title";

/// A timer context. Its string form is the value stored in
/// `data-contexto` and the banner image name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Contexto {
    /// Focus session.
    Foco,
    /// Short break.
    DescansoCurto,
    /// Long break.
    DescansoLongo,
}

impl Contexto {
    /// Selector of the button that switches to this context.
    #[must_use]
    pub const fn button_selector(self) -> &'static str {
        match self {
            Self::Foco => ".app__card-button--foco",
            Self::DescansoCurto => ".app__card-button--curto",
            Self::DescansoLongo => ".app__card-button--longo",
        }
    }

    /// Banner image path.
    #[must_use]
    pub fn banner_src(self) -> String {
        format!("/imagens/{self}.png")
    }

    /// Headline markup shown in the title.
    #[must_use]
    pub const fn title_html(self) -> &'static str {
        match self {
            Self::Foco => {
                "Otimize sua produtividade,<br>\n<strong class=\"app__title-strong\">mergulhe no que importa.</strong>"
            }
            Self::DescansoCurto => {
                "Que tal dar uma respirada?<br>\n<strong class=\"app__title-strong\">Faça uma pausa curta!</strong>"
            }
            Self::DescansoLongo => {
                "Hora de voltar à superfície.<br>\n<strong class=\"app__title-strong\">Faça uma pausa longa.</strong>"
            }
        }
    }
}

/// Nodes touched by a context switch, resolved once at mount.
#[derive(Debug, Clone)]
struct ContextNodes {
    root: NodeId,
    banner: NodeId,
    title: NodeId,
    buttons: Vec<NodeId>,
}

/// Wire the three context buttons of `document`.
///
/// The root element must be `html`.
///
/// # Errors
///
/// [`WidgetError::MissingElement`] if any expected element is absent.
pub fn mount(document: &mut Document) -> Result<(), WidgetError> {
    let nodes = ContextNodes {
        root: required(document, "html")?,
        banner: required(document, BANNER)?,
        title: required(document, TITLE)?,
        buttons: document.query_selector_all(&format!(".{CARD_BUTTON_CLASS}"))?,
    };

    for contexto in Contexto::iter() {
        let button = required(document, contexto.button_selector())?;
        let nodes = nodes.clone();
        document.add_event_listener(
            button,
            "click",
            Listener::new(move |doc, _| {
                apply(doc, &nodes, contexto)?;
                doc.element_mut(button)?.class_list_mut().add([ACTIVE_CLASS]);
                Ok(())
            }),
        )?;
    }

    tracing::debug!(buttons = nodes.buttons.len(), "context switcher mounted");
    Ok(())
}

fn apply(doc: &mut Document, nodes: &ContextNodes, contexto: Contexto) -> Result<(), WidgetError> {
    for &button in &nodes.buttons {
        doc.element_mut(button)?.class_list_mut().remove([ACTIVE_CLASS]);
    }
    doc.element_mut(nodes.root)?
        .set_attribute(CONTEXT_ATTRIBUTE, contexto);
    doc.element_mut(nodes.banner)?
        .set_attribute("src", contexto.banner_src());
    doc.element_mut(nodes.title)?
        .set_inner_html(contexto.title_html());
    tracing::debug!(%contexto, "context switched");
    Ok(())
}
