use indexmap::map::Entry;
use smol_str::SmolStr;
use text_size::TextRange;

use super::{AbstractIndex, Collected, EnumNormalizer, MemberKey, Phase};
use crate::frontend::{Delimited, FragmentShape, Frontend};
use crate::uast::error::{Result, UastError};
use crate::uast::kind::NodeKind;
use crate::uast::node::{NodePath, UastNode};

/// A method found directly inside a constant body
#[derive(Debug, Clone)]
pub(super) struct BodyMethod {
    pub(super) key: MemberKey,
    pub(super) path: NodePath,
    pub(super) range: TextRange,
}

/// What linking needs to know about one built constant
#[derive(Debug, Clone)]
pub(super) struct ConstantEntry {
    pub(super) name: SmolStr,
    pub(super) ordinal: u32,
    pub(super) range: TextRange,
    pub(super) has_body: bool,
    pub(super) methods: Vec<BodyMethod>,
}

impl<F: Frontend> EnumNormalizer<'_, '_, F> {
    /// Run the phase machine over one enum declaration
    pub(super) fn enum_declaration(
        &self,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let fe = self.frontend;
        let kind = NodeKind::EnumDeclaration;
        let range = fe.range(fragment);
        let constants = fe.constants(fragment);
        let members = fe.members(fragment);

        let mut children = Vec::new();
        let mut entries: Vec<ConstantEntry> = Vec::new();
        let mut abstracts = AbstractIndex::default();
        let mut abstract_paths = Vec::new();
        let mut phase = Phase::Start;

        loop {
            let next = match phase {
                Phase::Start => {
                    children.extend(self.modifiers(fragment)?);
                    children.push(self.identifier(&kind, fragment)?);
                    for super_type in fe.super_types(fragment) {
                        children.push(self.factory.leaf(NodeKind::TypeReference, super_type)?);
                    }
                    if constants.is_empty() {
                        Phase::ScanningMembers
                    } else {
                        Phase::ScanningConstants
                    }
                }
                Phase::ScanningConstants => {
                    for (ordinal, constant) in constants.iter().enumerate() {
                        let constant_path = path.child(children.len());
                        let (node, entry) =
                            self.constant(constant, ordinal as u32, &constant_path, depth, out)?;
                        children.push(node);
                        entries.push(entry);
                    }
                    if !members.is_empty() {
                        Phase::ScanningMembers
                    } else if entries.iter().any(|e| e.has_body) {
                        Phase::Linking
                    } else {
                        Phase::Done
                    }
                }
                Phase::ScanningMembers => {
                    for member in &members {
                        let member_path = path.child(children.len());
                        let node = self.lower(member, &member_path, depth, out)?;
                        if fe.shape(member) == FragmentShape::Method && fe.is_abstract(member) {
                            if let Some(key) = MemberKey::of(&node) {
                                abstract_paths.push(member_path.clone());
                                match abstracts.entry(key) {
                                    Entry::Vacant(slot) => {
                                        slot.insert(member_path);
                                    }
                                    Entry::Occupied(first) => tracing::warn!(
                                        "[LINK] abstract {} at {} has the same key as {}; overrides link to the first",
                                        first.key(),
                                        member_path,
                                        first.get()
                                    ),
                                }
                            }
                        }
                        children.push(node);
                    }
                    Phase::Linking
                }
                Phase::Linking => {
                    self.link(path, &entries, &abstracts, out);
                    Phase::Done
                }
                Phase::Done => break,
            };
            tracing::debug!("[NORMALIZE] enum at {}: {:?} -> {:?}", path, phase, next);
            phase = next;
        }

        out.abstract_members.extend(abstract_paths);
        self.factory.node(kind, range, children)
    }

    /// One enum constant: modifiers, name, optional arguments and body
    fn constant(
        &self,
        fragment: &F::Fragment,
        ordinal: u32,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<(UastNode, ConstantEntry)> {
        let fe = self.frontend;
        let kind = NodeKind::EnumConstant { ordinal };
        let range = fe.range(fragment);
        self.check_depth(&kind, fragment, depth)?;
        let depth = depth + 1;

        let mut children = self.modifiers(fragment)?;
        children.push(self.identifier(&kind, fragment)?);

        if let Some(arguments) = fe.arguments(fragment) {
            let arguments_path = path.child(children.len());
            children.push(self.arguments(arguments, &arguments_path, depth, out)?);
        }

        let mut methods = Vec::new();
        let has_body = match fe.class_body(fragment) {
            Some(body) => {
                let body_path = path.child(children.len());
                let node = self.anonymous_class(body, &body_path, depth, out)?;
                methods = node
                    .children()
                    .iter()
                    .enumerate()
                    .filter_map(|(index, member)| {
                        Some(BodyMethod {
                            key: MemberKey::of(member)?,
                            path: body_path.child(index),
                            range: member.range(),
                        })
                    })
                    .collect();
                children.push(node);
                true
            }
            None => false,
        };

        let node = self.factory.node(kind, range, children)?;
        let name = SmolStr::new(node.name().unwrap_or_default());
        tracing::trace!(
            "[NORMALIZE] constant {} #{} body={} methods={}",
            name,
            ordinal,
            has_body,
            methods.len()
        );

        let entry = ConstantEntry {
            name,
            ordinal,
            range,
            has_body,
            methods,
        };
        Ok((node, entry))
    }

    /// Anonymous class owned by a constant or object creation
    pub(super) fn anonymous_class(
        &self,
        body: Delimited<F::Fragment>,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let mut children = Vec::with_capacity(body.items.len());
        for member in &body.items {
            let member_path = path.child(children.len());
            children.push(self.lower(member, &member_path, depth, out)?);
        }
        self.factory.node(NodeKind::AnonymousClass, body.range, children)
    }

    /// Class or interface declaration with its members
    pub(super) fn type_declaration(
        &self,
        kind: NodeKind,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let fe = self.frontend;
        let mut children = self.modifiers(fragment)?;
        children.push(self.identifier(&kind, fragment)?);
        for super_type in fe.super_types(fragment) {
            children.push(self.factory.leaf(NodeKind::TypeReference, super_type)?);
        }
        for member in fe.members(fragment) {
            let member_path = path.child(children.len());
            children.push(self.lower(&member, &member_path, depth, out)?);
        }
        self.factory.node(kind, fe.range(fragment), children)
    }

    /// Method or constructor: modifiers, return type, name, parameters, body
    pub(super) fn callable(
        &self,
        kind: NodeKind,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let fe = self.frontend;
        let range = fe.range(fragment);
        let mut children = self.modifiers(fragment)?;

        if kind == NodeKind::FunctionDeclaration {
            let Some(return_type) = fe.type_ref(fragment) else {
                return Err(UastError::malformed(kind, range, "method without return type"));
            };
            children.push(self.type_reference(return_type)?);
        }
        children.push(self.identifier(&kind, fragment)?);

        for parameter in fe.parameters(fragment) {
            children.push(self.parameter(&parameter)?);
        }

        if let Some(body) = fe.body(fragment) {
            let body_path = path.child(children.len());
            children.push(self.block(body, &body_path, depth, out)?);
        }

        let node = self.factory.node(kind, range, children)?;
        tracing::trace!("[NORMALIZE] {} {}", node.kind(), node.name().unwrap_or("?"));
        Ok(node)
    }

    fn parameter(&self, fragment: &F::Fragment) -> Result<UastNode> {
        let fe = self.frontend;
        let kind = NodeKind::Parameter;
        let range = fe.range(fragment);
        let mut children = self.modifiers(fragment)?;
        let Some(ty) = fe.type_ref(fragment) else {
            return Err(UastError::malformed(kind, range, "parameter without type"));
        };
        children.push(self.type_reference(ty)?);
        children.push(self.identifier(&kind, fragment)?);
        self.factory.node(kind, range, children)
    }

    /// Field or local variable declaration with one or more declarators
    pub(super) fn variables(
        &self,
        kind: NodeKind,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let fe = self.frontend;
        let range = fe.range(fragment);
        let mut children = self.modifiers(fragment)?;
        let Some(ty) = fe.type_ref(fragment) else {
            return Err(UastError::malformed(kind, range, "declaration without type"));
        };
        children.push(self.type_reference(ty)?);

        let declarators = fe.declarators(fragment);
        if declarators.is_empty() {
            return Err(UastError::malformed(kind, range, "declaration without variables"));
        }
        for declarator in declarators {
            children.push(self.factory.leaf(NodeKind::Identifier, declarator.name)?);
            if let Some(initializer) = &declarator.initializer {
                let init_path = path.child(children.len());
                children.push(self.lower(initializer, &init_path, depth, out)?);
            }
        }
        self.factory.node(kind, range, children)
    }

    /// Instance or static initializer block
    pub(super) fn initializer(
        &self,
        fragment: &F::Fragment,
        path: &NodePath,
        depth: usize,
        out: &mut Collected,
    ) -> Result<UastNode> {
        let fe = self.frontend;
        let kind = NodeKind::Initializer;
        let range = fe.range(fragment);
        let mut children = self.modifiers(fragment)?;
        let Some(body) = fe.body(fragment) else {
            return Err(UastError::malformed(kind, range, "initializer without body"));
        };
        let body_path = path.child(children.len());
        children.push(self.block(body, &body_path, depth, out)?);
        self.factory.node(kind, range, children)
    }
}
