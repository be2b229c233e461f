//! Restaurant categories understood by the search provider

/// A provider category: the alias sent on the wire and its spoken title
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub alias: &'static str,
    pub title: &'static str,
}

const fn cat(alias: &'static str, title: &'static str) -> Category {
    Category { alias, title }
}

/// Restaurant categories from the Yelp category list
pub static CATEGORIES: &[Category] = &[
    cat("afghani", "Afghan"),
    cat("african", "African"),
    cat("newamerican", "American (New)"),
    cat("tradamerican", "American (Traditional)"),
    cat("arabian", "Arabian"),
    cat("argentine", "Argentine"),
    cat("armenian", "Armenian"),
    cat("asianfusion", "Asian Fusion"),
    cat("bbq", "Barbeque"),
    cat("basque", "Basque"),
    cat("belgian", "Belgian"),
    cat("brasseries", "Brasseries"),
    cat("brazilian", "Brazilian"),
    cat("breakfast_brunch", "Breakfast & Brunch"),
    cat("british", "British"),
    cat("buffets", "Buffets"),
    cat("burgers", "Burgers"),
    cat("burmese", "Burmese"),
    cat("cafes", "Cafes"),
    cat("cajun", "Cajun/Creole"),
    cat("cambodian", "Cambodian"),
    cat("caribbean", "Caribbean"),
    cat("cheesesteaks", "Cheesesteaks"),
    cat("chicken_wings", "Chicken Wings"),
    cat("chinese", "Chinese"),
    cat("dimsum", "Dim Sum"),
    cat("comfortfood", "Comfort Food"),
    cat("creperies", "Creperies"),
    cat("cuban", "Cuban"),
    cat("delis", "Delis"),
    cat("diners", "Diners"),
    cat("ethiopian", "Ethiopian"),
    cat("hotdogs", "Fast Food"),
    cat("filipino", "Filipino"),
    cat("fishnchips", "Fish & Chips"),
    cat("fondue", "Fondue"),
    cat("foodstands", "Food Stands"),
    cat("french", "French"),
    cat("gastropubs", "Gastropubs"),
    cat("german", "German"),
    cat("gluten_free", "Gluten-Free"),
    cat("greek", "Greek"),
    cat("halal", "Halal"),
    cat("hawaiian", "Hawaiian"),
    cat("himalayan", "Himalayan/Nepalese"),
    cat("hotdog", "Hot Dogs"),
    cat("hotpot", "Hot Pot"),
    cat("hungarian", "Hungarian"),
    cat("indpak", "Indian"),
    cat("indonesian", "Indonesian"),
    cat("irish", "Irish"),
    cat("italian", "Italian"),
    cat("japanese", "Japanese"),
    cat("korean", "Korean"),
    cat("kosher", "Kosher"),
    cat("latin", "Latin American"),
    cat("lebanese", "Lebanese"),
    cat("malaysian", "Malaysian"),
    cat("mediterranean", "Mediterranean"),
    cat("mexican", "Mexican"),
    cat("mideastern", "Middle Eastern"),
    cat("mongolian", "Mongolian"),
    cat("moroccan", "Moroccan"),
    cat("noodles", "Noodles"),
    cat("pakistani", "Pakistani"),
    cat("persian", "Persian/Iranian"),
    cat("peruvian", "Peruvian"),
    cat("pizza", "Pizza"),
    cat("polish", "Polish"),
    cat("portuguese", "Portuguese"),
    cat("ramen", "Ramen"),
    cat("russian", "Russian"),
    cat("salad", "Salad"),
    cat("sandwiches", "Sandwiches"),
    cat("seafood", "Seafood"),
    cat("soulfood", "Soul Food"),
    cat("soup", "Soup"),
    cat("southern", "Southern"),
    cat("spanish", "Spanish"),
    cat("steak", "Steakhouses"),
    cat("sushi", "Sushi Bars"),
    cat("taiwanese", "Taiwanese"),
    cat("tapas", "Tapas Bars"),
    cat("tex-mex", "Tex-Mex"),
    cat("thai", "Thai"),
    cat("turkish", "Turkish"),
    cat("ukrainian", "Ukrainian"),
    cat("vegan", "Vegan"),
    cat("vegetarian", "Vegetarian"),
    cat("vietnamese", "Vietnamese"),
];

/// Alias for a lower-cased spoken word, matched against alias or title
pub fn find_category(word: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|c| {
            c.alias.eq_ignore_ascii_case(word) || c.title.eq_ignore_ascii_case(word)
        })
        .map(|c| c.alias)
}

/// Spoken title for a category alias
pub fn category_title(alias: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| c.alias == alias).map(|c| c.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_alias_and_title() {
        assert_eq!(find_category("indpak"), Some("indpak"));
        assert_eq!(find_category("indian"), Some("indpak"));
        assert_eq!(find_category("sushi bars"), Some("sushi"));
        assert_eq!(find_category("cheap"), None);
    }

    #[test]
    fn test_title_for_alias() {
        assert_eq!(category_title("indpak"), Some("Indian"));
        assert_eq!(category_title("nope"), None);
    }

    #[test]
    fn test_aliases_are_unique() {
        let aliases: HashSet<_> = CATEGORIES.iter().map(|c| c.alias).collect();
        assert_eq!(aliases.len(), CATEGORIES.len());
    }
}
