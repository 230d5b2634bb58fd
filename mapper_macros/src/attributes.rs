//! Parsing of `#[mapping(...)]` field attributes

use syn::{Attribute, LitStr, Type};

/// What a single field declares through its `#[mapping(...)]` attributes
pub enum FieldRole {
    /// A reflected field, optionally mapped
    Field {
        target:   Option<Box<Target>>,
        readonly: bool,
    },
    /// The embedded base sub-object
    Base,
    /// Excluded from reflection
    Skip,
}

/// `to = Type, field = "name"`
pub struct Target {
    pub ty:    Type,
    pub field: Option<LitStr>,
}

#[derive(Default)]
struct Collected {
    to:       Vec<Type>,
    field:    Option<LitStr>,
    base:     bool,
    skip:     bool,
    readonly: bool,
}

/// Merge every `#[mapping(...)]` attribute on a field into its role
pub fn parse_field_role(attrs: &[Attribute]) -> syn::Result<FieldRole> {
    let mut collected = Collected::default();
    let mut last_attr = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("mapping")) {
        last_attr = Some(attr);
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("to") {
                collected.to.push(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("field") {
                if collected.field.is_some() {
                    return Err(meta.error("duplicate `field`"));
                }
                collected.field = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("base") {
                collected.base = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                collected.skip = true;
                Ok(())
            } else if meta.path.is_ident("readonly") {
                collected.readonly = true;
                Ok(())
            } else {
                Err(meta.error(
                    "unsupported mapping attribute, expected `to`, `field`, `base`, `skip` or `readonly`",
                ))
            }
        })?;
    }

    let Some(attr) = last_attr else {
        return Ok(FieldRole::Field {
            target:   None,
            readonly: false,
        });
    };

    let error =
        |message: &str| -> syn::Result<FieldRole> { Err(syn::Error::new_spanned(attr, message)) };
    let has_field_options =
        !collected.to.is_empty() || collected.field.is_some() || collected.readonly;

    match collected {
        Collected {
            base: true,
            skip: true,
            ..
        } => error("`base` and `skip` are mutually exclusive"),
        Collected { base: true, .. } if has_field_options => {
            error("`base` cannot be combined with other mapping options")
        }
        Collected { skip: true, .. } if has_field_options => {
            error("`skip` cannot be combined with other mapping options")
        }
        Collected { base: true, .. } => Ok(FieldRole::Base),
        Collected { skip: true, .. } => Ok(FieldRole::Skip),
        Collected { to, .. } if to.len() > 1 => {
            error("a field can declare only one mapping target")
        }
        Collected {
            field: Some(_),
            ref to,
            ..
        } if to.is_empty() => error("`field` requires `to`"),
        Collected {
            mut to,
            field,
            readonly,
            ..
        } => Ok(FieldRole::Field {
            target: to.pop().map(|ty| Box::new(Target { ty, field })),
            readonly,
        }),
    }
}
