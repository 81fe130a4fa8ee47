//! Code emission.
//!
//! Turns a validated layout into the six codec procedures and renders them
//! as two `impl` blocks: an inherent one holding the hidden constructor and
//! one implementing the runtime's `BinaryStructurable` trait.
//!
//! Every read and write is a single forward pass over the members in wire
//! order that returns at the first failure.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{Ident, Path};

use binstruct_codec::Endianness;

use crate::decl::{MemberKind, RecordDecl, TypeDescriptor, TypeKind};
use crate::{IncludedMember, RecordLayout, SchemaConfig, SizeExpr};

/// Name of the generated full-member constructor.
const CONSTRUCTOR: &str = "__binary_structurable_new";

/// The emitted procedure bodies, each a complete item.
#[derive(Clone, Debug)]
pub struct Procedures {
    /// `const BINARY_SIZE: usize`.
    pub binary_size: TokenStream,
    /// Inherent constructor taking every included member in wire order.
    pub constructor: TokenStream,
    /// `try_write_to`, writing through a growable sink.
    pub write_to_sink: TokenStream,
    /// `try_write`, writing into a byte slice.
    pub write: TokenStream,
    /// `try_read`, reading from a byte slice.
    pub read: TokenStream,
    /// `try_read_sequence`, reading from a segmented sequence.
    pub read_sequence: TokenStream,
}

/// Generated code for one record.
#[derive(Clone, Debug)]
pub struct GeneratedCodec {
    pub descriptor: TypeDescriptor,
    pub layout: RecordLayout,
    pub size: SizeExpr,
    pub procedures: Procedures,
    runtime: Path,
}

impl ToTokens for GeneratedCodec {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.descriptor.name;
        let runtime = &self.runtime;
        let (impl_generics, ty_generics, where_clause) = self.descriptor.generics.split_for_impl();
        let Procedures {
            binary_size,
            constructor,
            write_to_sink,
            write,
            read,
            read_sequence,
        } = &self.procedures;

        tokens.extend(quote! {
            impl #impl_generics #name #ty_generics #where_clause {
                #constructor
            }

            impl #impl_generics #runtime::BinaryStructurable for #name #ty_generics #where_clause {
                #binary_size
                #write_to_sink
                #write
                #read
                #read_sequence
            }
        });
    }
}

/// Emit the procedures of a validated record.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(record = %record.descriptor.qualified_name())
)]
pub fn emit(record: &RecordDecl, layout: RecordLayout, config: &SchemaConfig) -> GeneratedCodec {
    let size = layout.size();
    let emitter = Emitter {
        record,
        layout: &layout,
        runtime: &config.runtime_path,
    };
    let procedures = Procedures {
        binary_size: emitter.binary_size(&size),
        constructor: emitter.constructor(),
        write_to_sink: emitter.write_to_sink(),
        write: emitter.write(),
        read: emitter.read(),
        read_sequence: emitter.read_sequence(),
    };
    tracing::debug!(
        members = layout.len(),
        size = ?size.constant(),
        "emitted codec"
    );
    GeneratedCodec {
        descriptor: record.descriptor.clone(),
        layout,
        size,
        procedures,
        runtime: config.runtime_path.clone(),
    }
}

/// Which reader a read procedure walks with.
#[derive(Copy, Clone, Eq, PartialEq)]
enum Source {
    Slice,
    Sequence,
}

struct Emitter<'a> {
    record: &'a RecordDecl,
    layout: &'a RecordLayout,
    runtime: &'a Path,
}

impl Emitter<'_> {
    fn binary_size(&self, size: &SizeExpr) -> TokenStream {
        let size = size.to_tokens_with(self.runtime);
        quote! {
            const BINARY_SIZE: usize = #size;
        }
    }

    fn constructor(&self) -> TokenStream {
        let constructor = constructor_ident();
        let params = self.layout.iter().map(|member| {
            let local = local(member.index);
            let ty = &member.ty;
            quote!(#local: #ty)
        });

        // Members left out of the layout start from their default value.
        let mut names = Vec::new();
        let mut values = Vec::new();
        for (index, candidate) in self.record.members.iter().enumerate() {
            let value = if self.layout.iter().any(|member| member.index == index) {
                local(index).into_token_stream()
            } else if candidate.kind == MemberKind::Field {
                quote!(::core::default::Default::default())
            } else {
                continue;
            };
            names.push(&candidate.name);
            values.push(value);
        }

        let body = match self.record.descriptor.kind {
            TypeKind::Struct => quote!(Self { #(#names: #values),* }),
            TypeKind::TupleStruct => quote!(Self(#(#values),*)),
            TypeKind::UnitStruct => quote!(Self),
        };
        quote! {
            #[doc(hidden)]
            #[inline]
            #[allow(clippy::too_many_arguments)]
            fn #constructor(#(#params),*) -> Self {
                #body
            }
        }
    }

    fn write_to_sink(&self) -> TokenStream {
        let rt = self.runtime;
        quote! {
            fn try_write_to<__W: #rt::BufferWriter + ?Sized>(&self, writer: &mut __W) -> bool {
                let size = <Self as #rt::BinaryStructurable>::BINARY_SIZE;
                let span = match #rt::BufferWriter::get_span(&mut *writer, size) {
                    ::core::result::Result::Ok(span) => span,
                    ::core::result::Result::Err(_) => return false,
                };
                if !<Self as #rt::BinaryStructurable>::try_write(self, span) {
                    return false;
                }
                #rt::BufferWriter::advance(&mut *writer, size);
                true
            }
        }
    }

    fn write(&self) -> TokenStream {
        let rt = self.runtime;
        let steps = self.layout.iter().map(|member| self.write_member(member));
        let writer = (!self.layout.is_empty()).then(|| {
            quote!(let mut writer = #rt::ByteWriter::new(buffer);)
        });
        quote! {
            fn try_write(&self, buffer: &mut [u8]) -> bool {
                if buffer.len() < <Self as #rt::BinaryStructurable>::BINARY_SIZE {
                    return false;
                }
                #writer
                #(#steps)*
                true
            }
        }
    }

    fn write_member(&self, member: &IncludedMember) -> TokenStream {
        let rt = self.runtime;
        let name = &member.name;
        let ty = &member.ty;
        if member.type_data.is_primitive() {
            let method = write_method(member);
            quote! {
                if !writer.#method(self.#name) {
                    return false;
                }
            }
        } else {
            quote! {
                if !#rt::BinaryStructurable::try_write(&self.#name, writer.remaining_mut()) {
                    return false;
                }
                if !writer.advance(<#ty as #rt::BinaryStructurable>::BINARY_SIZE) {
                    return false;
                }
            }
        }
    }

    fn read(&self) -> TokenStream {
        let rt = self.runtime;
        let steps = self
            .layout
            .iter()
            .map(|member| self.read_member(member, Source::Slice));
        let reader = (!self.layout.is_empty()).then(|| {
            quote!(let mut reader = #rt::ByteReader::new(buffer);)
        });
        let build = self.build();
        quote! {
            fn try_read(buffer: &[u8]) -> ::core::option::Option<Self> {
                if buffer.len() < <Self as #rt::BinaryStructurable>::BINARY_SIZE {
                    return ::core::option::Option::None;
                }
                #reader
                #(#steps)*
                #build
            }
        }
    }

    fn read_sequence(&self) -> TokenStream {
        let rt = self.runtime;
        let steps = self
            .layout
            .iter()
            .map(|member| self.read_member(member, Source::Sequence));
        let reader = (!self.layout.is_empty()).then(|| {
            quote!(let mut reader = #rt::SequenceReader::new(buffer);)
        });
        let build = self.build();
        quote! {
            fn try_read_sequence(
                buffer: #rt::ByteSequence<'_>,
            ) -> ::core::option::Option<Self> {
                let size = <Self as #rt::BinaryStructurable>::BINARY_SIZE;
                if buffer.is_single_segment() || buffer.first_segment().len() >= size {
                    return <Self as #rt::BinaryStructurable>::try_read(buffer.first_segment());
                }
                if buffer.len() < size {
                    return ::core::option::Option::None;
                }
                #reader
                #(#steps)*
                #build
            }
        }
    }

    fn read_member(&self, member: &IncludedMember, source: Source) -> TokenStream {
        let rt = self.runtime;
        let local = local(member.index);
        let ty = &member.ty;
        if member.type_data.is_primitive() {
            let method = read_method(member);
            return quote! {
                let #local: #ty = reader.#method()?;
            };
        }
        let read = match source {
            Source::Slice => quote! {
                <#ty as #rt::BinaryStructurable>::try_read(reader.remaining())?
            },
            Source::Sequence => quote! {
                <#ty as #rt::BinaryStructurable>::try_read_sequence(buffer.slice(reader.position()))?
            },
        };
        quote! {
            let #local: #ty = #read;
            if !reader.advance(<#ty as #rt::BinaryStructurable>::BINARY_SIZE) {
                return ::core::option::Option::None;
            }
        }
    }

    /// `Some(Self::__binary_structurable_new(..))` over the read locals.
    fn build(&self) -> TokenStream {
        let constructor = constructor_ident();
        let locals = self.layout.iter().map(|member| local(member.index));
        quote! {
            ::core::option::Option::Some(Self::#constructor(#(#locals),*))
        }
    }
}

fn constructor_ident() -> Ident {
    Ident::new(CONSTRUCTOR, Span::call_site())
}

/// Local holding the member at `index` among all candidates.
fn local(index: usize) -> Ident {
    format_ident!("__member_{}", index)
}

fn write_method(member: &IncludedMember) -> Ident {
    let name = if member.type_data.is_single_byte() {
        "write_byte"
    } else {
        match member.options.endianness {
            Endianness::Little => "write_little",
            Endianness::Big => "write_big",
        }
    };
    Ident::new(name, Span::call_site())
}

fn read_method(member: &IncludedMember) -> Ident {
    let name = if member.type_data.is_single_byte() {
        "read_byte"
    } else {
        match member.options.endianness {
            Endianness::Little => "read_little",
            Endianness::Big => "read_big",
        }
    };
    Ident::new(name, Span::call_site())
}
