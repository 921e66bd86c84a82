use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use cityio::slurp_file;
use cityutil::{prettyprint_usize, Tags, Timer};
use geom::LonLat;

use crate::{MapTopology, Node, NodeID, OsmID, Relation, RelationID, Way, WayID};

// Node references to missing objects are just filtered out, and ways that end up with no nodes at
// all are dropped. Relation members are kept as-is, since members legitimately point outside of an
// extract.
// https://wiki.openstreetmap.org/wiki/OSM_XML#Certainties_and_Uncertainties says elements usually
// come in order (nodes, ways, then relations), but way node refs are only checked once everything
// is scraped, so a way may appear before its nodes.

pub fn read_file(path: &str, timer: &mut Timer) -> Result<MapTopology> {
    timer.start(format!("read {}", path));
    let bytes = slurp_file(path)?;
    let raw_string = std::str::from_utf8(&bytes).with_context(|| format!("{} isn't UTF-8", path))?;
    timer.stop(format!("read {}", path));
    read_str(raw_string, timer).with_context(|| format!("parsing {}", path))
}

pub fn read_str(raw_string: &str, timer: &mut Timer) -> Result<MapTopology> {
    let tree = roxmltree::Document::parse(raw_string)?;
    let mut map = MapTopology::new();

    timer.start("scrape objects");
    for obj in tree.descendants() {
        if !obj.is_element() {
            continue;
        }
        match obj.tag_name().name() {
            "node" => {
                let id = NodeID(parse_attr(obj, "id")?);
                if map.nodes.contains_key(&id) {
                    bail!("Duplicate {}, your .osm is corrupt", id);
                }
                let pt = LonLat::new(parse_attr(obj, "lon")?, parse_attr(obj, "lat")?);
                if !pt.is_valid() {
                    bail!("{} has an out-of-range position {}", id, pt);
                }
                let tags = read_tags(obj)?;
                map.nodes.insert(id, Node { pt, tags });
            }
            "way" => {
                let id = WayID(parse_attr(obj, "id")?);
                if map.ways.contains_key(&id) {
                    bail!("Duplicate {}, your .osm is corrupt", id);
                }
                let tags = read_tags(obj)?;

                let mut nodes = Vec::new();
                for child in obj.children() {
                    if child.tag_name().name() == "nd" {
                        nodes.push(NodeID(parse_attr(child, "ref")?));
                    }
                }
                map.ways.insert(id, Way { nodes, tags });
            }
            "relation" => {
                let id = RelationID(parse_attr(obj, "id")?);
                if map.relations.contains_key(&id) {
                    bail!("Duplicate {}, your .osm is corrupt", id);
                }
                let tags = read_tags(obj)?;
                let mut members = Vec::new();
                for child in obj.children() {
                    if child.tag_name().name() != "member" {
                        continue;
                    }
                    let member = match child.attribute("type") {
                        Some("node") => OsmID::Node(NodeID(parse_attr(child, "ref")?)),
                        Some("way") => OsmID::Way(WayID(parse_attr(child, "ref")?)),
                        Some("relation") => OsmID::Relation(RelationID(parse_attr(child, "ref")?)),
                        _ => continue,
                    };
                    let role = child.attribute("role").unwrap_or("").to_string();
                    members.push((role, member));
                }
                map.relations.insert(id, Relation { tags, members });
            }
            _ => {}
        }
    }
    timer.stop("scrape objects");

    let all_nodes = &map.nodes;
    for (id, way) in map.ways.iter_mut() {
        let before = way.nodes.len();
        way.nodes.retain(|n| all_nodes.contains_key(n));
        if way.nodes.len() < before {
            debug!("{} references {} missing nodes", id, before - way.nodes.len());
        }
    }
    map.ways.retain(|_, way| !way.nodes.is_empty());

    timer.note(format!(
        "Found {} nodes, {} ways, {} relations",
        prettyprint_usize(map.nodes.len()),
        prettyprint_usize(map.ways.len()),
        prettyprint_usize(map.relations.len())
    ));

    Ok(map)
}

fn parse_attr<T>(obj: roxmltree::Node, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = match obj.attribute(key) {
        Some(x) => x,
        None => bail!("<{}> is missing the {} attribute", obj.tag_name().name(), key),
    };
    raw.parse::<T>()
        .with_context(|| format!("<{}> has a bad {}: {}", obj.tag_name().name(), key, raw))
}

fn read_tags(obj: roxmltree::Node) -> Result<Tags> {
    let mut tags = Tags::new(BTreeMap::new());
    for child in obj.children() {
        if child.tag_name().name() == "tag" {
            let key = match child.attribute("k") {
                Some(k) => k,
                None => bail!("<tag> without a key"),
            };
            // Filter out really useless data
            if key.starts_with("tiger:") || key.starts_with("old_name:") {
                continue;
            }
            tags.insert(key, child.attribute("v").unwrap_or(""));
        }
    }
    Ok(tags)
}
