// Layout tree rebuilt every frame; leaves borrow the form state

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

/// Anything that can paint itself into a rectangle
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// A split with one constraint per child, or a single panel.
pub enum Node<'a> {
    Split {
        direction: Direction,
        children: Vec<(Constraint, Node<'a>)>,
    },
    Leaf(Box<dyn Panel + 'a>),
}

impl Node<'_> {
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Leaf(panel) => panel.draw(f, area),
            Node::Split {
                direction,
                children,
            } => {
                let areas =
                    Layout::new(*direction, children.iter().map(|(c, _)| *c)).split(area);
                for ((_, child), &child_area) in children.iter().zip(areas.iter()) {
                    child.draw(f, child_area);
                }
            }
        }
    }

    /// Number of panels in the tree
    pub fn panels(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split { children, .. } => children.iter().map(|(_, n)| n.panels()).sum(),
        }
    }
}

pub fn group<'a>(
    direction: Direction,
    children: impl IntoIterator<Item = (Constraint, Node<'a>)>,
) -> Node<'a> {
    Node::Split {
        direction,
        children: children.into_iter().collect(),
    }
}

pub fn leaf<'a>(panel: impl Panel + 'a) -> Node<'a> {
    Node::Leaf(Box::new(panel))
}
