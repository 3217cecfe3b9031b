//! Ontology for ancient-script symbol datasets.
//!
//! All graph data lives under a fixed namespace bound once for the life of
//! the process. The vocabulary follows the oxrdf `vocab` convention:
//! `NamedNodeRef` constants grouped by namespace.

use oxigraph::model::vocab::{rdf, rdfs};
use oxigraph::model::{Literal, NamedNodeRef, TripleRef};

use crate::error::LipiResult;
use crate::store::GraphStore;

/// Terms in the ancient-scripts namespace (`http://example.org/scripts#`).
pub mod script {
    use oxigraph::model::NamedNodeRef;

    /// Namespace IRI prefix for all script/symbol resources.
    pub const NS: &str = "http://example.org/scripts#";

    // Classes
    /// An ancient writing system.
    pub const SCRIPT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#Script");
    /// An individual character or glyph.
    pub const SYMBOL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#Symbol");
    /// A group of related scripts.
    pub const SCRIPT_FAMILY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#ScriptFamily");

    // Properties
    /// Script contains symbol.
    pub const HAS_SYMBOL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#hasSymbol");
    /// Similarity relationship between symbols.
    pub const SIMILAR_TO: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#similarTo");
    /// Numerical similarity score.
    pub const SIMILARITY_SCORE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#similarityScore");
    /// Family classification of a script (the `scriptFamily` property).
    pub const FAMILY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#scriptFamily");
    /// Usage frequency of a symbol.
    pub const SYMBOL_FREQUENCY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#symbolFrequency");
    /// Number of contours in a glyph.
    pub const CONTOUR_COUNT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#contourCount");
    /// Source script of a resource, stored as a plain literal.
    pub const FROM_SCRIPT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#fromScript");

    // Script family instances
    pub const INDUS_VALLEY_FAMILY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#IndusValleyFamily");
    pub const PROTO_ELAMITE_FAMILY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#ProtoElamiteFamily");
    pub const NAXI_FAMILY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#NaxiFamily");
    pub const YI_FAMILY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#YiFamily");
    pub const BA_SHU_FAMILY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://example.org/scripts#BaShuFamily");
}

/// The OWL terms the ontology declaration uses.
pub mod owl {
    use oxigraph::model::NamedNodeRef;

    pub const CLASS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
    pub const OBJECT_PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
    pub const DATATYPE_PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
}

/// VoID vocabulary terms used by the dataset description.
pub mod void {
    use oxigraph::model::NamedNodeRef;

    pub const DATASET: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://rdfs.org/ns/void#Dataset");
    pub const SPARQL_ENDPOINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://rdfs.org/ns/void#sparqlEndpoint");
    pub const TRIPLES: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://rdfs.org/ns/void#triples");
    pub const ENTITIES: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://rdfs.org/ns/void#entities");
    pub const CLASS_PARTITION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://rdfs.org/ns/void#classPartition");
    pub const CLS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://rdfs.org/ns/void#cls");
}

/// PROV-O terms stamped on published datasets.
pub mod prov {
    use oxigraph::model::NamedNodeRef;

    pub const ENTITY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#Entity");
}

/// Dublin Core terms stamped on published datasets.
pub mod dcterms {
    use oxigraph::model::NamedNodeRef;

    pub const CREATOR: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/creator");
    pub const CREATED: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");
    pub const DESCRIPTION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description");
}

/// The dataset resource described by VoID and publication metadata.
pub const DATASET: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://example.org/scripts/dataset");

/// Advertised SPARQL endpoint IRI in the VoID description.
pub const SPARQL_ENDPOINT: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://example.org/sparql");

/// Class declarations with their `rdfs:comment` text.
const CLASSES: &[(NamedNodeRef<'static>, &str)] = &[
    (script::SCRIPT, "Ancient writing system"),
    (script::SYMBOL, "Individual character/glyph"),
    (script::SCRIPT_FAMILY, "Group of related scripts"),
];

/// Property declarations: term, comment, OWL property type.
const PROPERTIES: &[(NamedNodeRef<'static>, &str, NamedNodeRef<'static>)] = &[
    (script::HAS_SYMBOL, "Script contains symbol", owl::OBJECT_PROPERTY),
    (script::SIMILAR_TO, "Similarity relationship", owl::OBJECT_PROPERTY),
    (script::SIMILARITY_SCORE, "Numerical similarity", owl::DATATYPE_PROPERTY),
    (script::FAMILY, "Family classification", owl::OBJECT_PROPERTY),
    (script::SYMBOL_FREQUENCY, "Usage frequency", owl::DATATYPE_PROPERTY),
    (script::CONTOUR_COUNT, "Number of contours in glyph", owl::DATATYPE_PROPERTY),
    (script::FROM_SCRIPT, "Indicates source script", owl::DATATYPE_PROPERTY),
];

/// The fixed script-family instances.
const FAMILIES: &[NamedNodeRef<'static>] = &[
    script::INDUS_VALLEY_FAMILY,
    script::PROTO_ELAMITE_FAMILY,
    script::NAXI_FAMILY,
    script::YI_FAMILY,
    script::BA_SHU_FAMILY,
];

/// Insert the class and property declarations plus the fixed family
/// instances into the store.
///
/// Safe to call on an already-populated store: the store has set
/// semantics, so repeated declarations add nothing.
pub fn define_ontology(store: &mut GraphStore) -> LipiResult<()> {
    for (class, comment) in CLASSES {
        store.insert(TripleRef::new(*class, rdf::TYPE, owl::CLASS))?;
        let comment = Literal::from(*comment);
        store.insert(TripleRef::new(*class, rdfs::COMMENT, comment.as_ref()))?;
    }

    for (property, comment, property_type) in PROPERTIES {
        store.insert(TripleRef::new(*property, rdf::TYPE, *property_type))?;
        let comment = Literal::from(*comment);
        store.insert(TripleRef::new(*property, rdfs::COMMENT, comment.as_ref()))?;
    }

    for family in FAMILIES {
        store.insert(TripleRef::new(*family, rdf::TYPE, script::SCRIPT_FAMILY))?;
    }

    Ok(())
}

/// Fixed mapping from script directory names to family instances.
///
/// Scripts outside the mapping (e.g. `proto_cuneiform`) simply carry no
/// family triple.
pub fn family_for_script(name: &str) -> Option<NamedNodeRef<'static>> {
    match name {
        "indus" => Some(script::INDUS_VALLEY_FAMILY),
        "proto_elamite" => Some(script::PROTO_ELAMITE_FAMILY),
        "naxi_dongba" | "old_naxi" => Some(script::NAXI_FAMILY),
        "yi" | "standard_yi" => Some(script::YI_FAMILY),
        "ba-shu" => Some(script::BA_SHU_FAMILY),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use oxigraph::model::NamedNode;

    use super::*;

    #[test]
    fn vocabulary_terms_are_valid_iris() {
        for (class, _) in CLASSES {
            NamedNode::new(class.as_str()).unwrap();
        }
        for (property, _, property_type) in PROPERTIES {
            NamedNode::new(property.as_str()).unwrap();
            NamedNode::new(property_type.as_str()).unwrap();
        }
        for family in FAMILIES {
            NamedNode::new(family.as_str()).unwrap();
        }
        NamedNode::new(DATASET.as_str()).unwrap();
        NamedNode::new(SPARQL_ENDPOINT.as_str()).unwrap();
    }

    #[test]
    fn define_ontology_is_idempotent() {
        let mut store = GraphStore::new().unwrap();
        define_ontology(&mut store).unwrap();
        let first = store.len().unwrap();
        assert!(first > 0);

        define_ontology(&mut store).unwrap();
        assert_eq!(store.len().unwrap(), first);
    }

    #[test]
    fn family_mapping_is_partial() {
        assert_eq!(
            family_for_script("indus"),
            Some(script::INDUS_VALLEY_FAMILY)
        );
        assert_eq!(
            family_for_script("standard_yi"),
            Some(script::YI_FAMILY)
        );
        assert_eq!(family_for_script("proto_cuneiform"), None);
        assert_eq!(family_for_script("unknown"), None);
    }
}
