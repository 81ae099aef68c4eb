mod helpers;

mod selection_menu;
